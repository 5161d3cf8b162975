use clap::Parser;
use sceros::adapters::output::{self, OutputFormat};
use sceros::config::cli::Command;
use sceros::core::dashboard::DashboardSummary;
use sceros::domain::dataset::Dataset;
use sceros::domain::model::EntityId;
use sceros::domain::ports::ConfigProvider;
use sceros::utils::{logger, validation::parse_key_value};
use sceros::{
    CliConfig, Dashboard, DataView, FileStore, Result, ScerosError, Settings, SortDirection,
    SortState,
};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}

fn run(config: &CliConfig) -> Result<()> {
    let page_size = match &config.command {
        Command::View { page_size, .. } => *page_size,
        _ => None,
    };
    let settings = Settings::resolve(config, page_size)?;
    let store = FileStore::new(settings.session_dir());
    let mut dashboard = Dashboard::open(&settings, store)?;

    match &config.command {
        Command::Login { email, password } => {
            let user = dashboard.login(email, password)?;
            println!("✅ Signed in as {} ({})", user.name, user.role);
            println!("🏠 Home: {}", user.role.home_route().path());
        }
        Command::Logout => {
            dashboard.logout()?;
            println!("👋 Signed out");
        }
        Command::Whoami => match dashboard.current_user() {
            Some(user) => {
                println!("{} <{}> - {}", user.name, user.email, user.role);
                for link in user.role.nav_links() {
                    println!("  {:<18} {}", link.name, link.href);
                }
            }
            None => println!("Not signed in"),
        },
        Command::View {
            dataset,
            search,
            filters,
            sort,
            desc,
            page,
            format,
            ..
        } => {
            let dataset: Dataset = dataset.parse()?;
            let format: OutputFormat = format.parse()?;
            let records = dashboard.records_for(dataset)?;
            let columns = dataset.columns();

            let mut view =
                DataView::new(&records, &columns, dashboard.initial_state()).search(search.clone());
            for raw in filters {
                let (key, value) = parse_key_value("filter", raw)?;
                if !view.accepts_filter(&key, &value) {
                    return Err(ScerosError::InvalidConfigValueError {
                        field: "filter".to_string(),
                        value: raw.clone(),
                        reason: format!("{} does not allow filtering '{}' by '{}'", dataset, key, value),
                    });
                }
                view = view.filter(&key, &value);
            }
            if let Some(key) = sort {
                if !view.accepts_sort(key) {
                    return Err(ScerosError::InvalidConfigValueError {
                        field: "sort".to_string(),
                        value: key.clone(),
                        reason: format!("'{}' is not sortable in {}", key, dataset),
                    });
                }
                let direction = if *desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                view = view.sorted(SortState::by(key.clone(), direction));
            }

            let view = view.go_to_page(*page);
            let result = view.current();
            if result.page != *page {
                tracing::warn!("Page {} is out of range, showing page {}", page, result.page);
            }
            print!("{}", output::render(&result, &columns, format)?);
        }
        Command::Summary { json, area } => {
            let area = area.as_deref().map(EntityId::parse);
            let summary = dashboard.summary_for_area(area.as_ref())?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &DashboardSummary) {
    println!("📊 {} ({}) - {} areas", summary.user_name, summary.role, summary.area_count);
    for resource in &summary.resources {
        println!(
            "  {:<12} {:>10.1} {:<4} trend {:+}%  status {}",
            resource.resource.label(),
            resource.total,
            resource.unit,
            resource.trend,
            resource.status
        );
    }
    println!(
        "  Alerts: {} unresolved, {} resolved",
        summary.unresolved_alerts, summary.resolved_alerts
    );
    println!(
        "  Recommendations: {} ({} high priority)",
        summary.recommendations, summary.high_priority_recommendations
    );
    if let Some(system) = &summary.system {
        println!(
            "  Users: {} ({} active)  Areas: {}  Active alerts: {}",
            system.total_users, system.active_users, system.total_areas, system.active_alerts
        );
    }
}
