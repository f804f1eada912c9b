use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use bubble_orbit::net::BubbleSource;
use bubble_orbit::orbit::OrbitConfig;

mod app;
mod ui;

use app::BubbleApp;

/// Bubbles orbiting a central anchor. Click one to fly in and open it.
#[derive(Parser, Debug)]
#[command(name = "bubble-orbit", version, about)]
struct Args {
    /// Number of generated bubbles (used when neither --file nor --url is given)
    #[arg(long, default_value_t = 15)]
    mock: usize,

    /// JSON array of bubble rows
    #[arg(long)]
    file: Option<PathBuf>,

    /// Endpoint returning a JSON array of bubble rows (API key from BUBBLE_API_KEY)
    #[arg(long)]
    url: Option<String>,

    /// JSON file overriding orbit tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// How many bubbles the Trending view keeps
    #[arg(long, default_value_t = 10)]
    trending_limit: usize,
}

impl Args {
    fn source(&self) -> BubbleSource {
        if let Some(url) = &self.url {
            BubbleSource::Remote(url.clone())
        } else if let Some(path) = &self.file {
            BubbleSource::File(path.clone())
        } else {
            BubbleSource::Mock(self.mock)
        }
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match OrbitConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(2);
            }
        },
        None => OrbitConfig::default(),
    };
    let source = args.source();
    log::info!("bubble source: {}", source.describe());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bubble Orbit",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            let mut app = BubbleApp::new(source, config, args.trending_limit);
            app.reload(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
}

impl eframe::App for BubbleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_fetch();

        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, ctx);
        });

        // Stats side panel
        if self.show_stats {
            egui::SidePanel::right("stats")
                .default_width(220.0)
                .show(ctx, |ui| {
                    self.draw_stats_panel(ui);
                });
        }

        // Main content area
        let ctx_clone = ctx.clone();
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.draw_content(ui, &ctx_clone);
            });
    }
}
