use super::*;
use crate::foundation::core::Fps;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps { num: 60, den: 1 },
    }
}

fn solid(width: u32, height: u32) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: vec![255; (width * height * 4) as usize],
        premultiplied: true,
    }
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("neon_heart_{}_{name}", std::process::id()))
}

#[test]
fn video_config_requires_even_nonzero_size() {
    assert!(validate_video_config(&cfg(400, 300)).is_ok());
    assert!(validate_video_config(&cfg(0, 300)).is_err());
    let err = validate_video_config(&cfg(401, 300)).unwrap_err();
    assert!(err.to_string().contains("even"));
    let mut bad_fps = cfg(400, 300);
    bad_fps.fps.den = 0;
    assert!(validate_video_config(&bad_fps).is_err());
}

#[test]
fn encoder_args_describe_raw_rgba_input_and_h264_output() {
    let opts = FfmpegSinkOpts::new("out/clip.mp4");
    let args = encoder_args(&cfg(400, 300), &opts);
    let args: Vec<&str> = args.iter().map(|a| a.to_str().unwrap()).collect();

    let after = |flag: &str| {
        let pos = args.iter().position(|a| *a == flag).unwrap();
        args[pos + 1]
    };
    assert_eq!(after("-video_size"), "400x300");
    assert_eq!(after("-framerate"), "60/1");
    assert_eq!(after("-f"), "rawvideo");
    assert_eq!(after("-i"), "-");
    assert_eq!(after("-c:v"), "libx264");
    assert!(args.contains(&"-y"));
    assert_eq!(args.last(), Some(&"out/clip.mp4"));

    // Input options come before `-i`, output options after it.
    let input = args.iter().position(|a| *a == "-i").unwrap();
    assert!(args.iter().position(|a| *a == "-framerate").unwrap() < input);
    assert!(args.iter().position(|a| *a == "-c:v").unwrap() > input);
}

#[test]
fn encoder_args_refuse_to_clobber_without_overwrite() {
    let opts = FfmpegSinkOpts {
        overwrite: false,
        ..FfmpegSinkOpts::new("clip.mp4")
    };
    let args = encoder_args(&cfg(2, 2), &opts);
    assert!(args.iter().any(|a| a == "-n"));
    assert!(!args.iter().any(|a| a == "-y"));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    assert!(sink.push_frame(FrameIndex(0), &solid(2, 2)).is_err());
    assert!(sink.end().is_err());
    assert!(!sink.is_encoding());
}

#[test]
fn begin_keeps_an_existing_file_without_overwrite() {
    let out = scratch_path("existing.mp4");
    std::fs::write(&out, b"keep me").unwrap();
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        overwrite: false,
        ..FfmpegSinkOpts::new(&out)
    });

    let err = sink.begin(cfg(16, 16)).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert!(!sink.is_encoding());
    assert_eq!(std::fs::read(&out).unwrap(), b"keep me");
    let _ = std::fs::remove_file(&out);
}

#[test]
fn dropping_an_idle_sink_is_quiet() {
    let sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    drop(sink);
}

#[test]
fn ffmpeg_roundtrip_when_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let out = scratch_path("roundtrip.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(16, 16)).unwrap();
    for i in 0..3 {
        sink.push_frame(FrameIndex(i), &solid(16, 16)).unwrap();
    }
    sink.end().unwrap();
    assert!(!sink.is_encoding());
    assert!(out.is_file());
    let _ = std::fs::remove_file(&out);
}

#[test]
fn dropping_mid_stream_stops_ffmpeg_when_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let out = scratch_path("abandoned.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(16, 16)).unwrap();
    sink.push_frame(FrameIndex(0), &solid(16, 16)).unwrap();
    assert!(sink.is_encoding());

    // A mismatched frame fails without stopping the encoder; dropping it must not hang.
    assert!(sink.push_frame(FrameIndex(1), &solid(8, 8)).is_err());
    assert!(sink.is_encoding());
    drop(sink);
    let _ = std::fs::remove_file(&out);
}
