//! Frame-by-frame caption compositor
//!
//! Decodes the video stream of a segment clip, stamps both captions on
//! every frame and re-encodes into a video-only MP4. Audio is carried
//! separately and muxed back afterwards.

use std::path::Path;

use ffmpeg_next as ffmpeg;
use ffmpeg::codec;
use ffmpeg::format::{self, Pixel};
use ffmpeg::media;
use ffmpeg::software::scaling;
use ffmpeg::util::frame::video::Video as VideoFrame;
use ffmpeg::{Dictionary, Packet, Rational};
use tracing::{debug, info, warn};

use crate::adapters::toml_config::EncodingConfig;
use crate::domain::errors::DomainError;
use crate::domain::model::OverlaySpec;
use crate::engine::layout::CaptionLayout;
use crate::engine::painter::{CaptionStamp, RgbCanvas, TextPainter};
use crate::ports::OverlayReport;

/// Frame rate assumed when the stream does not declare one
const FALLBACK_FRAME_RATE: Rational = Rational(25, 1);

fn overlay_err(context: &'static str) -> impl Fn(ffmpeg::Error) -> DomainError {
    move |e| DomainError::Overlay(format!("{}: {}", context, e))
}

/// Renders captions with libav decode and encode
#[derive(Debug, Clone)]
pub struct OverlayCompositor {
    encoder_threads: usize,
    encoding: EncodingConfig,
}

impl OverlayCompositor {
    pub fn new(encoding: EncodingConfig) -> Self {
        Self {
            encoder_threads: num_cpus::get().max(1),
            encoding,
        }
    }

    /// Blocking render of `input` into `output`
    ///
    /// The font is opened first so a bad font path fails before any media
    /// work starts.
    pub fn render(
        &self,
        input: &Path,
        output: &Path,
        spec: &OverlaySpec,
    ) -> Result<OverlayReport, DomainError> {
        let mut painter = TextPainter::load(&spec.font_path, spec.font_size)?;
        let layout = CaptionLayout::compute(&painter, spec);
        let stamp = CaptionStamp::new(&mut painter, &spec.top_text, &spec.bottom_text, layout);
        debug!("Caption layout: {:?}", stamp.layout());

        ffmpeg::init().map_err(overlay_err("Failed to initialize libav"))?;

        let mut input_ctx = format::input(&input).map_err(|e| {
            DomainError::Overlay(format!("Failed to open {}: {}", input.display(), e))
        })?;
        let mut output_ctx = format::output(&output).map_err(|e| {
            DomainError::Overlay(format!("Failed to create {}: {}", output.display(), e))
        })?;

        let mut pipeline = FramePipeline::open(&input_ctx, &mut output_ctx, spec, self)?;

        output_ctx
            .write_header()
            .map_err(overlay_err("Failed to write output header"))?;
        pipeline.output_time_base = output_ctx
            .stream(0)
            .map(|s| s.time_base())
            .unwrap_or(pipeline.encoder_time_base);

        for (stream, packet) in input_ctx.packets() {
            if stream.index() != pipeline.stream_index {
                continue;
            }
            pipeline
                .decoder
                .send_packet(&packet)
                .map_err(overlay_err("Failed to decode packet"))?;
            pipeline.drain_decoder(&painter, &stamp, &mut output_ctx)?;
        }

        pipeline
            .decoder
            .send_eof()
            .map_err(overlay_err("Failed to flush decoder"))?;
        pipeline.drain_decoder(&painter, &stamp, &mut output_ctx)?;

        pipeline
            .encoder
            .send_eof()
            .map_err(overlay_err("Failed to flush encoder"))?;
        pipeline.drain_encoder(&mut output_ctx)?;

        output_ctx
            .write_trailer()
            .map_err(overlay_err("Failed to write output trailer"))?;

        info!(
            "Rendered {} frames at {:.3} fps into {}",
            pipeline.frames,
            f64::from(pipeline.frame_rate),
            output.display()
        );

        Ok(OverlayReport {
            output: output.to_path_buf(),
            frames: pipeline.frames,
            frame_rate: f64::from(pipeline.frame_rate),
        })
    }
}

/// Decoder, scalers and encoder for one render
struct FramePipeline {
    stream_index: usize,
    decoder: ffmpeg::decoder::Video,
    encoder: ffmpeg::encoder::Video,
    to_rgb: scaling::Context,
    to_yuv: scaling::Context,
    width: u32,
    height: u32,
    frame_rate: Rational,
    encoder_time_base: Rational,
    output_time_base: Rational,
    frames: u64,
}

impl FramePipeline {
    fn open(
        input_ctx: &format::context::Input,
        output_ctx: &mut format::context::Output,
        spec: &OverlaySpec,
        settings: &OverlayCompositor,
    ) -> Result<Self, DomainError> {
        let stream = input_ctx
            .streams()
            .best(media::Type::Video)
            .ok_or_else(|| DomainError::Overlay("No video stream in clip".to_string()))?;
        let stream_index = stream.index();

        let frame_rate = pick_frame_rate(stream.avg_frame_rate(), stream.rate());
        debug!("Clip frame rate {}/{}", frame_rate.numerator(), frame_rate.denominator());

        let decoder = codec::context::Context::from_parameters(stream.parameters())
            .and_then(|ctx| ctx.decoder().video())
            .map_err(overlay_err("Failed to open video decoder"))?;

        let (width, height) = (spec.frame.width, spec.frame.height);
        let global_header = output_ctx
            .format()
            .flags()
            .contains(format::Flags::GLOBAL_HEADER);

        let codec = find_video_encoder()?;
        let mut ost = output_ctx
            .add_stream(codec)
            .map_err(overlay_err("Failed to add output stream"))?;

        let mut encoder = codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()
            .map_err(overlay_err("Failed to create video encoder"))?;

        let encoder_time_base = frame_rate.invert();
        encoder.set_width(width);
        encoder.set_height(height);
        encoder.set_format(Pixel::YUV420P);
        encoder.set_time_base(encoder_time_base);
        encoder.set_frame_rate(Some(frame_rate));
        if global_header {
            encoder.set_flags(codec::Flags::GLOBAL_HEADER);
        }
        encoder.set_threading(codec::threading::Config {
            kind: codec::threading::Type::Frame,
            count: settings.encoder_threads,
            ..Default::default()
        });

        let mut options = Dictionary::new();
        if codec.id() == codec::Id::H264 {
            options.set("preset", &settings.encoding.preset);
            options.set("crf", &settings.encoding.crf.to_string());
        }

        let encoder = encoder
            .open_as_with(codec, options)
            .map_err(overlay_err("Failed to open video encoder"))?;
        ost.set_parameters(&encoder);

        let to_rgb = scaling::Context::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB24,
            width,
            height,
            scaling::Flags::BILINEAR,
        )
        .map_err(overlay_err("Failed to create RGB scaler"))?;

        let to_yuv = scaling::Context::get(
            Pixel::RGB24,
            width,
            height,
            Pixel::YUV420P,
            width,
            height,
            scaling::Flags::BILINEAR,
        )
        .map_err(overlay_err("Failed to create YUV scaler"))?;

        Ok(Self {
            stream_index,
            decoder,
            encoder,
            to_rgb,
            to_yuv,
            width,
            height,
            frame_rate,
            encoder_time_base,
            output_time_base: encoder_time_base,
            frames: 0,
        })
    }

    fn drain_decoder(
        &mut self,
        painter: &TextPainter,
        stamp: &CaptionStamp,
        output_ctx: &mut format::context::Output,
    ) -> Result<(), DomainError> {
        let mut decoded = VideoFrame::empty();
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            let mut rgb = VideoFrame::empty();
            self.to_rgb
                .run(&decoded, &mut rgb)
                .map_err(overlay_err("Failed to convert frame to RGB"))?;

            let stride = rgb.stride(0);
            let mut canvas = RgbCanvas::new(rgb.data_mut(0), self.width, self.height, stride);
            stamp.apply(painter, &mut canvas);

            let mut yuv = VideoFrame::empty();
            self.to_yuv
                .run(&rgb, &mut yuv)
                .map_err(overlay_err("Failed to convert frame to YUV"))?;
            yuv.set_pts(Some(self.frames as i64));
            self.frames += 1;

            self.encoder
                .send_frame(&yuv)
                .map_err(overlay_err("Failed to encode frame"))?;
            self.drain_encoder(output_ctx)?;
        }
        Ok(())
    }

    fn drain_encoder(&mut self, output_ctx: &mut format::context::Output) -> Result<(), DomainError> {
        let mut encoded = Packet::empty();
        while self.encoder.receive_packet(&mut encoded).is_ok() {
            encoded.set_stream(0);
            encoded.rescale_ts(self.encoder_time_base, self.output_time_base);
            encoded
                .write_interleaved(output_ctx)
                .map_err(overlay_err("Failed to write packet"))?;
        }
        Ok(())
    }
}

/// Prefer the average frame rate, then the base rate, then 25 fps
fn pick_frame_rate(average: Rational, base: Rational) -> Rational {
    for rate in [average, base] {
        if rate.numerator() > 0 && rate.denominator() > 0 {
            return rate;
        }
    }
    warn!("Clip declares no frame rate, assuming 25 fps");
    FALLBACK_FRAME_RATE
}

fn find_video_encoder() -> Result<ffmpeg::Codec, DomainError> {
    if let Some(codec) = ffmpeg::encoder::find_by_name("libx264") {
        return Ok(codec);
    }
    if let Some(codec) = ffmpeg::encoder::find(codec::Id::H264) {
        return Ok(codec);
    }
    warn!("No H.264 encoder available, falling back to MPEG-4");
    ffmpeg::encoder::find(codec::Id::MPEG4)
        .ok_or_else(|| DomainError::Overlay("No usable video encoder found".to_string()))
}
