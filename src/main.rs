use clap::Parser;
use salud_admin::config::cli::Command;
use salud_admin::core::export;
use salud_admin::core::grid::Grid;
use salud_admin::domain::model::RecordId;
use salud_admin::domain::ports::{ConfigProvider, Storage};
use salud_admin::utils::error::ErrorSeverity;
use salud_admin::utils::{logger, validation, validation::Validate};
use salud_admin::{
    AdminError, CliConfig, ConsoleNotifier, EntityKind, EntityTableController, HttpBackend,
    HttpController, LocalStorage, Settings,
};

fn controller(kind: EntityKind, settings: &Settings) -> HttpController<ConsoleNotifier> {
    EntityTableController::new(
        kind,
        HttpBackend::new(settings.api_base_url()),
        LocalStorage::new("."),
        ConsoleNotifier,
    )
}

fn print_entities() {
    for kind in EntityKind::ALL {
        let spec = kind.spec();
        println!("{} ({})", spec.title, kind);
        println!("  Collection: /{}", spec.collection_path);
        println!("  Import:     /upload-excel?table={}", spec.upload_table);
        println!("  Template:   {}", spec.template().href);
        let fields: Vec<&str> = spec.data_columns().map(|c| c.field).collect();
        println!("  Columns:    {}", fields.join(", "));
        println!();
    }
}

fn print_grid(grid: &Grid, page: Option<usize>, page_size: usize) {
    match page {
        Some(index) => {
            println!("{}", grid.render_page(index, page_size));
            println!(
                "Página {} de {} ({} registros)",
                index + 1,
                grid.page_count(page_size).max(1),
                grid.len()
            );
        }
        None => println!("{}", grid.render_rows(grid.rows())),
    }
}

/// `Ok(false)` when the action ran but the backend refused it.
async fn run(command: &Command, settings: &Settings) -> salud_admin::Result<bool> {
    let output = LocalStorage::new(settings.output_path());

    match command {
        Command::Entities => {
            print_entities();
            Ok(true)
        }
        Command::List {
            entity,
            page,
            page_size,
            json,
        } => {
            validation::validate_positive_number("page_size", *page_size, 1)?;
            let table = controller(*entity, settings);
            if !table.mount().await.is_success() {
                return Ok(false);
            }
            if *json {
                println!("{}", serde_json::to_string_pretty(&table.records())?);
            } else {
                print_grid(&table.grid(), *page, *page_size);
            }
            Ok(true)
        }
        Command::Delete { entity, id } => {
            let table = controller(*entity, settings);
            if !table.mount().await.is_success() {
                return Ok(false);
            }
            let outcome = table.delete_record(&RecordId::from(id.as_str())).await;
            Ok(outcome.is_success())
        }
        Command::Upload { entity, file } => {
            let table = controller(*entity, settings);
            table.mount().await;
            table.select_file(file.clone());
            let outcome = table.upload_pending_file().await;
            Ok(outcome.is_success())
        }
        Command::Template { entity } => {
            let template = controller(*entity, settings).download_template();
            match settings.templates_dir() {
                Some(dir) => {
                    let content = LocalStorage::new(dir).read_file(&template.file_name).await?;
                    output.write_file(&template.file_name, &content).await?;
                    let saved = output.resolve(&template.file_name);
                    tracing::info!("📥 Template saved to: {}", saved.display());
                    println!("📥 Plantilla guardada en: {}", saved.display());
                }
                None => {
                    tracing::info!("No templates directory configured, printing asset path");
                    println!("📥 {}", template.href);
                }
            }
            Ok(true)
        }
        Command::Export {
            entity: Some(kind),
            ..
        } => {
            let table = controller(*kind, settings);
            if !table.mount().await.is_success() {
                return Ok(false);
            }
            let csv = export::export_csv(table.spec(), &table.records())?;
            let file_name = export::csv_file_name(table.spec());
            output.write_file(&file_name, &csv).await?;
            println!("📁 Output saved to: {}", output.resolve(&file_name).display());
            Ok(true)
        }
        Command::Export { entity: None, .. } => {
            let mut entries = Vec::with_capacity(EntityKind::ALL.len());
            let mut complete = true;
            for kind in EntityKind::ALL {
                let table = controller(kind, settings);
                if table.mount().await.is_success() {
                    entries.push((table.spec(), table.records()));
                } else {
                    tracing::warn!("Skipping '{}' in snapshot", kind);
                    complete = false;
                }
            }

            let archive = export::snapshot_zip(&entries)?;
            let file_name = export::snapshot_file_name(chrono::Local::now());
            output.write_file(&file_name, &archive).await?;
            println!("📁 Output saved to: {}", output.resolve(&file_name).display());
            Ok(complete)
        }
    }
}

fn exit_code(error: &AdminError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 4, // 使用者輸入錯誤
        ErrorSeverity::Medium => 2, // 可重試
        ErrorSeverity::High => 1, // 設定錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();
    let settings = cli.settings().and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    });

    // 初始化日誌
    match &settings {
        Ok(s) if s.json_logs => logger::init_json_logger(s.log_level.as_deref()),
        Ok(s) => logger::init_cli_logger(cli.verbose, s.log_level.as_deref()),
        Err(_) => logger::init_cli_logger(cli.verbose, None),
    }

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    tracing::debug!("Settings: {:?}", settings);

    match run(&cli.command, &settings).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    }
}
