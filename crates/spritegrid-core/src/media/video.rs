use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use anyhow::Context;
use image::{DynamicImage, RgbImage};
use tracing::{debug, error, info, warn};

use super::frame::Frame;
use crate::error::{SpriteError, SpriteResult};
use crate::scale;

/// Video metadata obtained by probing with ffprobe.
struct ProbeResult {
    width: u32,
    height: u32,
    fps: f64,
}

fn probe(path: &Path) -> SpriteResult<ProbeResult> {
    info!(?path, "probing video metadata with ffprobe");

    let output = Command::new("ffprobe")
        .args([
            "-v", "error",
            "-select_streams", "v:0",
            "-show_entries", "stream=width,height,r_frame_rate",
            "-of", "csv=p=0",
        ])
        .arg(path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .context("failed to run ffprobe, is ffmpeg installed?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!(%stderr, ?path, "ffprobe failed");
        return Err(SpriteError::decode(format!("ffprobe failed: {stderr}")));
    }

    // Output format: "width,height,num/den"
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parts: Vec<&str> = stdout.trim().split(',').collect();
    if parts.len() < 3 {
        error!(%stdout, "unexpected ffprobe output format, expected width,height,fps");
        return Err(SpriteError::decode(format!(
            "unexpected ffprobe output: {stdout}"
        )));
    }

    let width: u32 = parts[0]
        .parse()
        .map_err(|_| SpriteError::decode(format!("bad video width: {}", parts[0])))?;
    let height: u32 = parts[1]
        .parse()
        .map_err(|_| SpriteError::decode(format!("bad video height: {}", parts[1])))?;

    let fps = if let Some((num, den)) = parts[2].split_once('/') {
        let num: f64 = num
            .parse()
            .map_err(|_| SpriteError::decode(format!("bad frame rate: {}", parts[2])))?;
        let den: f64 = den
            .parse()
            .map_err(|_| SpriteError::decode(format!("bad frame rate: {}", parts[2])))?;
        if den > 0.0 { num / den } else { 0.0 }
    } else {
        parts[2]
            .parse()
            .map_err(|_| SpriteError::decode(format!("bad frame rate: {}", parts[2])))?
    };

    if width == 0 || height == 0 {
        return Err(SpriteError::decode(format!(
            "invalid video dimensions: {width}x{height}"
        )));
    }

    info!(width, height, fps, "probe completed");
    Ok(ProbeResult { width, height, fps })
}

/// Decodes video frames by piping raw RGB24 data from the ffmpeg CLI.
struct VideoDecoder {
    child: Child,
    width: u32,
    height: u32,
    fps: f64,
    frame_count: u32,
    frame_bytes: usize,
}

impl VideoDecoder {
    /// Open a video file for decoding.
    fn open(path: &Path) -> SpriteResult<Self> {
        let info = probe(path)?;

        info!(?path, "spawning ffmpeg decoder process");

        let child = Command::new("ffmpeg")
            .args(["-i"])
            .arg(path)
            .args([
                "-f", "rawvideo",
                "-pix_fmt", "rgb24",
                "-v", "error",
                "pipe:1",
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("failed to spawn ffmpeg, is ffmpeg installed?")?;

        let frame_bytes = (info.width as usize) * (info.height as usize) * 3;

        info!(
            width = info.width,
            height = info.height,
            fps = info.fps,
            frame_bytes,
            "video decoder opened"
        );

        Ok(Self {
            child,
            width: info.width,
            height: info.height,
            fps: info.fps,
            frame_count: 0,
            frame_bytes,
        })
    }

    fn fps(&self) -> f64 {
        self.fps
    }

    /// Read the next full-resolution frame from the ffmpeg pipe, or `None`
    /// if the video is finished.
    fn next_image(&mut self) -> SpriteResult<Option<RgbImage>> {
        let stdout = self
            .child
            .stdout
            .as_mut()
            .context("ffmpeg stdout not available")?;

        let mut buf = vec![0u8; self.frame_bytes];
        let mut read = 0;

        while read < self.frame_bytes {
            match stdout.read(&mut buf[read..]) {
                Ok(0) => {
                    if read == 0 {
                        info!(total_frames = self.frame_count, "video stream ended");
                        return Ok(None);
                    }
                    error!(
                        read_bytes = read,
                        expected_bytes = self.frame_bytes,
                        frame = self.frame_count,
                        "ffmpeg stream ended mid-frame"
                    );
                    return Err(SpriteError::decode(format!(
                        "ffmpeg stream ended mid-frame (read {read}/{} bytes)",
                        self.frame_bytes,
                    )));
                }
                Ok(n) => read += n,
                Err(e) => {
                    error!(frame = self.frame_count, %e, "failed to read from ffmpeg pipe");
                    return Err(SpriteError::decode(format!(
                        "failed to read from ffmpeg pipe: {e}"
                    )));
                }
            }
        }

        let image = RgbImage::from_raw(self.width, self.height, buf)
            .context("failed to create RgbImage from raw frame data")?;

        debug!(frame_number = self.frame_count, "decoded frame");
        self.frame_count += 1;

        Ok(Some(image))
    }
}

impl Drop for VideoDecoder {
    fn drop(&mut self) {
        info!(total_frames = self.frame_count, "closing video decoder");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Decode every frame of a video container, resized to `width`×`height`.
///
/// Video frames carry no per-frame display delay; every frame gets a
/// uniform duration derived from the container's reported rate.
pub fn decode(path: &Path, width: u32, height: u32) -> SpriteResult<Vec<Frame>> {
    let mut decoder = VideoDecoder::open(path)?;

    let duration_ms = uniform_duration_ms(decoder.fps());
    if duration_ms.is_none() {
        warn!(
            fps = decoder.fps(),
            "container reports a non-positive frame rate, no durations assigned"
        );
    }

    let mut frames = Vec::new();
    while let Some(image) = decoder.next_image()? {
        let image = scale::resize_frame(&DynamicImage::ImageRgb8(image), width, height);
        frames.push(Frame {
            image,
            index: frames.len() as u32,
            duration_ms,
        });
    }

    info!(frame_count = frames.len(), ?duration_ms, "video decoded");
    Ok(frames)
}

/// Uniform per-frame display duration in whole milliseconds, derived from
/// the container's frame rate. A non-positive rate yields no duration.
fn uniform_duration_ms(fps: f64) -> Option<u32> {
    if fps > 0.0 {
        Some((1000.0 / fps) as u32)
    } else {
        None
    }
}
