use std::{fs, io, path::Path, process::ExitCode};

use onca_logging::{log_error, log_info, set_logger, LogCategory, Logger};
use onca_ucd::{build_data, DirectorySource, UcdSettings, UnicodeDatabaseBuilder};

pub const LOG_CAT : LogCategory = LogCategory::new("Main");

const DEFAULT_SETTINGS_FILE : &str = "ucd.toml";

static LOGGER : Logger = Logger::new();

/// Load the settings file, a missing file results in the default settings
fn load_settings(path: &Path) -> Result<UcdSettings, String> {
    match fs::read_to_string(path) {
        Ok(toml_data) => UcdSettings::load(&toml_data).map_err(|err| format!("Failed to load '{}': {err}", path.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(UcdSettings::default()),
        Err(err) => Err(format!("Failed to read '{}': {err}", path.display())),
    }
}

fn log_summary(db: &UnicodeDatabaseBuilder) {
    log_info!(LOG_CAT, "Built unicode {} database", db.version());
    log_info!(LOG_CAT, "  character records: {}", db.character_count());
    log_info!(LOG_CAT, "  contributory properties: {}", db.contributory_properties().iter().count());
    log_info!(LOG_CAT, "  core properties: {}", db.core_properties().iter().count());
    log_info!(LOG_CAT, "  blocks: {}", db.blocks().len());
    log_info!(LOG_CAT, "  unihan entries: {}", db.unihan_count());
}

fn main() -> ExitCode {
    set_logger(&LOGGER);
    LOGGER.set_log_to_console(true);

    let settings_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SETTINGS_FILE.to_string());
    let settings = match load_settings(Path::new(&settings_path)) {
        Ok(settings) => settings,
        Err(msg) => {
            log_error!(LOG_CAT, main, "{msg}");
            LOGGER.flush();
            return ExitCode::FAILURE;
        }
    };
    LOGGER.set_max_level(settings.log_level);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            log_error!(LOG_CAT, main, "Failed to create the runtime: {err}");
            LOGGER.flush();
            return ExitCode::FAILURE;
        }
    };

    let ucd = DirectorySource::new(&settings.ucd_directory);
    let unihan = DirectorySource::new(&settings.unihan_directory);
    log_info!(LOG_CAT, "Reading UCD files from '{}' and Unihan files from '{}'", ucd.directory().display(), unihan.directory().display());

    // Failures are logged by the builder
    let exit_code = match runtime.block_on(build_data(&ucd, &unihan, &settings)) {
        Ok(db) => {
            log_summary(&db);
            ExitCode::SUCCESS
        },
        Err(_) => ExitCode::FAILURE,
    };

    LOGGER.flush();
    exit_code
}
