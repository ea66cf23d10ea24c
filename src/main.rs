use clap::Parser;
use trendscope::{browse, cli, config, error, input, render};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use tracing_subscriber::EnvFilter;
use trendscope_common::{demo, Direction};

fn init_tracing(verbose: bool, config: &Config) {
    let fallback = if verbose {
        "trendscope=debug,trendscope_common=debug".to_string()
    } else {
        config.log_filter.clone().unwrap_or_else(|| "warn".to_string())
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_tracing(cli.verbose, &config);
    let viewer = config.effective_viewer();

    match cli.command {
        Commands::Plot { source, view, json } => {
            let pipeline = input::build_pipeline(&source, &view, &viewer)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&render::chart_json(&pipeline))?);
            } else {
                print!("{}", render::render_chart(&pipeline));
                if let Some(url) = pipeline.dataset_url() {
                    println!("\nDataset: {}", url);
                }
            }
        }

        Commands::Inspect { source, view, point, item } => {
            let mut pipeline = input::build_pipeline(&source, &view, &viewer)?;
            pipeline.click_point(point)?;

            // 1件ずつ進めてカルーセルの範囲内に止める
            for _ in 0..item {
                if !pipeline.navigate(Direction::Next) {
                    break;
                }
            }
            if let Some(clicked) = pipeline.chart().points().get(point) {
                println!("{}\n", clicked.hover_text());
            }
            print!("{}", render::render_selection(&pipeline, &viewer.image_base_url));
        }

        Commands::Browse { source, view } => {
            println!("🔎 trendscope - 対話ブラウズ\n");
            let mut pipeline = input::build_pipeline(&source, &view, &viewer)?;
            browse::run_interactive_browse(&mut pipeline, &viewer.image_base_url)?;
        }

        Commands::Demo { output } => {
            let json = demo::predictor_result_set().to_json_pretty()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✔ デモデータを保存: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Config { image_base_url, show_connections, reset_filters_on_load, show } => {
            let mut config = config;
            let changed = image_base_url.is_some()
                || show_connections.is_some()
                || reset_filters_on_load.is_some();

            if let Some(base) = image_base_url {
                config.viewer.image_base_url = base;
            }
            if let Some(enabled) = show_connections {
                config.viewer.show_connections = enabled;
            }
            if let Some(reset) = reset_filters_on_load {
                config.viewer.reset_filters_on_load = reset;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  画像ベース: {}", config.viewer.image_base_url);
                println!("  接続線: {}", if config.viewer.show_connections { "表示" } else { "非表示" });
                println!(
                    "  読み込み時にフィルタを戻す: {}",
                    if config.viewer.reset_filters_on_load { "はい" } else { "いいえ" }
                );
                println!("  パス: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
