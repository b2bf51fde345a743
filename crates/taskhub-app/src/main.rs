mod render;

use std::time::Duration;

use anyhow::Result;
use chrono::Local;

use taskhub_core::{Config, Session};
use taskhub_schedule::{ScheduleClient, ScheduleFeed};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    taskhub_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    let session = Session::from_config(&config)?;
    let client = ScheduleClient::new(session, &config.api.base_url);
    let feed = ScheduleFeed::new(client);

    tracing::info!("TaskHub schedule client started");

    if let Err(e) = feed.refresh().await {
        tracing::error!("Initial schedule fetch failed: {}", e);
        eprintln!("{}", e.user_message());
        if e.is_auth_error() {
            // Nothing else will succeed with this session; send the user
            // back through sign-in.
            anyhow::bail!("session expired");
        }
    }

    print_schedule(&feed);

    let watch = std::env::args().any(|arg| arg == "--watch");
    if watch && config.schedule.poll_seconds > 0 {
        let every = Duration::from_secs(config.schedule.poll_seconds);
        tracing::info!("Polling schedule every {:?}", every);
        let handle = feed.spawn_polling(every);
        handle.await?;
    }

    Ok(())
}

fn print_schedule(feed: &ScheduleFeed) {
    let Some(snapshot) = feed.snapshot() else {
        println!("No schedule data available");
        return;
    };

    let today = Local::now().date_naive();

    println!("{}", render::month_view(&snapshot.personal, today));
    println!("{}", render::week_view(&snapshot.personal, today));
    println!("{}", render::day_view(&snapshot.personal, today));
    println!("My deadlines");
    println!("{}", render::deadline_list(&snapshot.personal));
    println!("Team deadlines");
    println!("{}", render::deadline_list(&snapshot.team));
    println!("Workload distribution");
    println!("{}", render::workload_table(&snapshot.roster));

    if let Some(notice) = feed.last_error() {
        println!("(showing stale data: {})", notice);
    }
}
