fn main() {
    // ac-ffmpeg links dynamically on Windows; stage the DLLs next to the binary
    #[cfg(target_os = "windows")]
    {
        use std::path::PathBuf;

        let ffmpeg_bin = PathBuf::from("third_party/ffmpeg/bin");
        let Ok(out_dir) = std::env::var("OUT_DIR").map(PathBuf::from) else {
            return;
        };
        // OUT_DIR is target/<profile>/build/<crate>/out
        let Some(target_dir) = out_dir.ancestors().nth(3) else {
            println!("cargo:warning=Cannot resolve target dir from {}", out_dir.display());
            return;
        };

        if let Ok(entries) = std::fs::read_dir(&ffmpeg_bin) {
            for path in entries.flatten().map(|entry| entry.path()) {
                if !is_ffmpeg_video_dll(&path) {
                    continue;
                }
                let Some(name) = path.file_name() else { continue };
                let dest = target_dir.join(name);
                if !dest.exists() || modified(&path) > modified(&dest) {
                    match std::fs::copy(&path, &dest) {
                        Ok(_) => println!("cargo:warning=Copied {} to output dir", path.display()),
                        Err(e) => println!("cargo:warning=Failed to copy {}: {}", path.display(), e),
                    }
                }
            }
            println!("cargo:rustc-link-search=native={}", ffmpeg_bin.display());
        } else {
            println!(
                "cargo:warning=FFmpeg DLLs not found at {}",
                ffmpeg_bin.display()
            );
        }

        println!("cargo:rerun-if-changed=third_party/ffmpeg/bin");
    }
}

#[cfg(target_os = "windows")]
fn modified(path: &std::path::Path) -> std::time::SystemTime {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
}

/// Only the libraries needed to demux, decode and scale video.
#[cfg(target_os = "windows")]
fn is_ffmpeg_video_dll(path: &std::path::Path) -> bool {
    const VIDEO_DLL_PREFIXES: &[&str] = &["avcodec-", "avformat-", "avutil-", "swscale-", "swresample-"];

    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    let lower = file_name.to_ascii_lowercase();
    lower.ends_with(".dll") && VIDEO_DLL_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}
