// In main.rs
use anyhow::{Context, Result};
use clap::Parser;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};
use std::io;
use std::panic;
use std::sync::Arc;

use reelview::client::{load_post, loading_notice, PostApi, API};
use reelview::client::types::Post;
use reelview::config::{Cli, Settings};
use reelview::media::{DetachedMedia, MediaHandle};
use reelview::session::SessionProvider;
use reelview::ui::App;

async fn attach_media(settings: &Settings, post: &Post) -> Box<dyn MediaHandle> {
    if settings.no_video {
        return Box::new(DetachedMedia::new("video disabled"));
    }
    let Some(url) = post.media_url() else {
        return Box::new(DetachedMedia::new("post has no video"));
    };

    launch_player(&settings.player, url).await
}

#[cfg(unix)]
async fn launch_player(program: &str, url: &str) -> Box<dyn MediaHandle> {
    match reelview::media::MpvPlayer::launch(program, url).await {
        Ok(player) => Box::new(player),
        Err(e) => {
            log::error!("Could not attach player: {}", e);
            Box::new(DetachedMedia::new(e.to_string()))
        }
    }
}

#[cfg(not(unix))]
async fn launch_player(_program: &str, url: &str) -> Box<dyn MediaHandle> {
    log::warn!("No player backend for {} on this platform", url);
    Box::new(DetachedMedia::new("no player backend on this platform"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;
    reelview::logging::init(&settings.log_file, settings.level_filter()?)?;

    let sessions = SessionProvider::new(settings.viewer());
    let api: Arc<dyn PostApi> =
        Arc::new(API::new(&settings.base_url, settings.request_timeout())?);

    // The post must be loaded before anything is drawn; failure ends here.
    eprintln!("{}", loading_notice(&cli.post_id));
    let post = load_post(api.as_ref(), &cli.post_id)
        .await
        .context("could not open post")?;
    let media = attach_media(&settings, &post).await;

    // Set up panic hook for cleanup
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Clean up terminal
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
        // Call the original panic handler
        original_hook(panic_info);
    }));

    let mut app = App::new(api, sessions.session());
    app.open_detail(post, media);

    if let Err(err) = app.run().await {
        // Clean up terminal before handling the error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
