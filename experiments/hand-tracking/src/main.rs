use {
    base::*,
    com::{PageServer, StreamServer},
    hand_tracking::{Config, FrameAnnotator, FrameHandler, viewer_page},
    inference::Inference,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    match &config.log_dir {
        Some(dir) => init_file_logger(dir.clone())?,
        None => init_stdout_logger(),
    }
    set_min_level(config.log_level);

    #[cfg(feature = "cuda")]
    let inference = Inference::cuda(0);
    #[cfg(not(feature = "cuda"))]
    let inference = Inference::cpu();

    log_info!(
        "Loading models {} and {}",
        config.palm_model.display(),
        config.landmark_model.display()
    );
    let landmarker = inference.use_hand_landmarker(
        &config.palm_model,
        &config.landmark_model,
        config.landmarker,
    )?;
    log_info!("MediaPipe Hands model initialized successfully.");

    let handler = FrameHandler::new(FrameAnnotator::new(landmarker), config.jpeg_quality);
    let stream_server = StreamServer::bind(config.ws_addr.as_str(), handler).await?;
    let ws_port = stream_server.local_addr().port();
    log_info!("Frame stream listening on ws://{}", stream_server.local_addr());

    let page_server = PageServer::bind(config.http_addr.as_str(), viewer_page(ws_port)).await?;
    log_info!("Open http://{} in a browser", page_server.local_addr());

    tokio::signal::ctrl_c().await?;
    log_info!("Shutting down");
    Ok(())
}
