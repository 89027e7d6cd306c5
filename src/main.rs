mod common;
mod config;
mod conversation;
mod network;
mod render;
mod ui;

use std::error::Error;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use eframe::egui;
use network::{ChatClient, ChatWorker};
use tokio::sync::mpsc;
use ui::ChatApp;

use crate::common::Role;
use crate::config::AppConfig;
use crate::conversation::Conversation;
use crate::render::chart;

#[derive(Parser)]
#[command(
    name = "balltalk",
    version,
    about = "BALLTALK basketball chat client"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Chat endpoint URL (overrides config file and BALLTALK_ENDPOINT)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
enum Mode {
    /// Send one message without opening a window and print the exchange
    Ask {
        /// Message to send
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::resolve_config(&cli.config, cli.endpoint.clone());
    let client = ChatClient::from_config(&app_config)?;

    match cli.mode {
        Some(Mode::Ask { message }) => run_ask(client, message).await,
        None => run_desktop(client, app_config).await,
    }
}

async fn run_ask(client: ChatClient, message: String) -> Result<(), Box<dyn Error>> {
    if message.trim().is_empty() {
        return Err("message must not be empty".into());
    }

    let mut conversation = Conversation::new();
    conversation.exchange(&client, message).await;

    for message in conversation.messages() {
        println!("{}: {}", message.role.display_name(), message.content);
        if let (Role::Assistant, Some(chart)) = (message.role, &message.chart) {
            match chart::decode(&chart.image_source()) {
                Ok(image) => println!(
                    "[{}: {} image, {} bytes]",
                    chart.alt_text(),
                    image.mime,
                    image.bytes.len()
                ),
                Err(err) => println!("[{}: unavailable ({err})]", chart.alt_text()),
            }
        }
    }

    Ok(())
}

async fn run_desktop(client: ChatClient, app_config: AppConfig) -> Result<(), Box<dyn Error>> {
    // 1. Tạo các kênh giao tiếp (Channels)
    // UI -> Worker
    let (cmd_tx, cmd_rx) = mpsc::channel(8);
    // Worker -> UI
    let (event_tx, event_rx) = mpsc::channel(8);

    // 2. Khởi chạy chat worker (chạy ngầm)
    let endpoint = client.endpoint().to_string();
    tokio::spawn(ChatWorker::new(client, cmd_rx, event_tx).run());

    // 3. Khởi chạy UI (chạy trên main thread)
    let title = app_config.window_title;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([820.0, 720.0])
            .with_min_inner_size([420.0, 360.0]),
        ..Default::default()
    };

    let app_name = title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| {
            log::info!("Client started against {endpoint}");
            Ok(Box::new(ChatApp::new(cc, title, cmd_tx, event_rx)))
        }),
    )?;

    Ok(())
}
