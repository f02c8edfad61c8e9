use {
    analysis::{AnalysisSession, PipelineConfig, PipelineEvent},
    anyhow::{Context, bail},
    base::log,
    image::{Rotation, decode_rgb},
    inference::{BackendConfig, FullFrameDetector, RemoteHttpClassifier},
    std::{path::PathBuf, sync::Arc, time::Duration},
    tokio::sync::mpsc,
    video::{VideoFrame, latest_channel},
};

const DEFAULT_INTERVAL_MS: u64 = 100;

fn usage() -> ! {
    eprintln!("usage: replay <image-dir> [interval-ms] [--log-dir <dir>]");
    std::process::exit(2);
}

fn list_images(dir: &PathBuf) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("cannot read {}", dir.display()))? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "png"))
            .unwrap_or(false);
        if is_image {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let mut dir = None;
    let mut interval = Duration::from_millis(DEFAULT_INTERVAL_MS);
    let mut log_dir = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--log-dir" => log_dir = Some(args.next().unwrap_or_else(|| usage())),
            "-h" | "--help" => usage(),
            _ if dir.is_none() => dir = Some(PathBuf::from(arg)),
            _ => {
                let ms = arg.parse::<u64>().with_context(|| format!("bad interval {arg:?}"))?;
                interval = Duration::from_millis(ms);
            }
        }
    }
    let Some(dir) = dir else { usage() };

    match log_dir {
        Some(log_dir) => base::init_file_logger(log_dir)?,
        None => base::init_stdout_logger(),
    }

    let paths = list_images(&dir)?;
    if paths.is_empty() {
        bail!("no images in {}", dir.display());
    }
    log::info!("replaying {} images every {:?}", paths.len(), interval);

    let config = PipelineConfig::from_env();
    if let BackendConfig::Remote(remote) = config.backend() {
        let client = RemoteHttpClassifier::new(remote.clone())?;
        if !client.health().await {
            log::warn!("emotion service at {} is not healthy", remote.base_url());
        }
    }

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut session = AnalysisSession::open(&config, Arc::new(FullFrameDetector), Arc::new(events_tx))?;

    let printer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            match event {
                PipelineEvent::FaceDetected {
                    emotion,
                    confidence,
                } => println!("{emotion} {confidence:.2}"),
                PipelineEvent::NoFace => println!("no face"),
            }
        }
    });

    let (sender, receiver) = latest_channel();
    let producer = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        for (i, path) in paths.into_iter().enumerate() {
            ticker.tick().await;
            let data = match std::fs::read(&path) {
                Ok(data) => data,
                Err(err) => {
                    log::warn!("skipping {}: {}", path.display(), err);
                    continue;
                }
            };
            let image = match decode_rgb(&data) {
                Ok(image) => image,
                Err(err) => {
                    log::warn!("skipping {}: {}", path.display(), err);
                    continue;
                }
            };
            let frame = VideoFrame::rgb(image, Rotation::Deg0, interval * i as u32);
            if sender.send(frame).is_err() {
                break;
            }
        }
        // give the last frame a chance to be picked up before closing
        tokio::time::sleep(interval).await;
    });

    session.run(receiver).await;
    producer.await?;
    let stats = session.stats();
    session.close().await;
    drop(session);
    printer.await?;

    log::info!(
        "{} frames analyzed, {} throttled, {} classifications, {} events",
        stats.frames_analyzed,
        stats.throttled,
        stats.throttle_acquired,
        stats.events_emitted
    );
    Ok(())
}
