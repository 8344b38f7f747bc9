// Salon Day View
// Headless entry point: loads the bookings and prints the layout of one day

use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use salon_day_view::interaction::reload_from_source;
use salon_day_view::services::booking_store::BookingStore;
use salon_day_view::services::database::Database;
use salon_day_view::services::key_value::{SelectedDateMemory, SqliteKeyValueStore};
use salon_day_view::services::layout::PositionMapper;
use salon_day_view::services::persistence::{BookingPort, SqliteBookingRepository};
use salon_day_view::services::settings::load_or_default;
use salon_day_view::utils::date::parse_iso_date;
use salon_day_view::utils::time::to_time;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Salon Day View");

    let config = load_or_default();
    let db = Rc::new(open_database()?);

    let port: Rc<dyn BookingPort> = Rc::new(SqliteBookingRepository::new(Rc::clone(&db)));
    let store = BookingStore::new().shared();
    let loaded = reload_from_source(&store, port.as_ref())
        .await
        .context("Failed to load bookings")?;
    log::info!("Loaded {} bookings", loaded);

    let memory = SelectedDateMemory::new(
        Rc::new(SqliteKeyValueStore::new(Rc::clone(&db))),
        config.selected_date_storage_key.clone(),
    );
    let date = match std::env::args().nth(1) {
        Some(arg) => parse_iso_date(&arg)
            .with_context(|| format!("Expected a date as YYYY-MM-DD, got {:?}", arg))?,
        None => memory.load_or(Local::now().date_naive()),
    };
    memory.save(date);

    let mapper = PositionMapper::from_config(&config);
    print_day(&store.borrow(), date, &mapper);
    Ok(())
}

fn open_database() -> Result<Database> {
    #[cfg(debug_assertions)]
    let db_path = "salon.db".to_string();

    #[cfg(not(debug_assertions))]
    let db_path = match salon_day_view::services::settings::project_dirs() {
        Some(dirs) => {
            let data_dir = dirs.data_dir();
            std::fs::create_dir_all(data_dir).context("Failed to create data directory")?;
            data_dir.join("salon.db").to_string_lossy().to_string()
        }
        None => "salon_prod.db".to_string(),
    };

    let db = Database::new(&db_path)?;
    db.initialize_schema()?;
    Ok(db)
}

fn print_day(store: &BookingStore, date: NaiveDate, mapper: &PositionMapper) {
    let layout = store.layout_for(date, mapper);
    println!("{} ({} bookings)", date.format("%A %d %B %Y"), layout.len());

    for placed in &layout.placements {
        let Some(booking) = store.get(&placed.booking_id) else {
            continue;
        };
        println!(
            "  {}-{}  {:<14} {:<20} col {}/{}  top {:>6.1}px  height {:>5.1}px",
            booking.start_time,
            to_time(booking.end_minutes()),
            booking.service_kind.display_name(),
            booking.primary_client_name(),
            placed.assignment.column + 1,
            placed.assignment.total_columns,
            placed.geometry.top_px,
            placed.geometry.height_px,
        );
    }
}
