//! Terminal life clock.
//!
//! Shows how far along a lifespan you are as a 24-hour clock. Settings are
//! asked for on first run and stored in the config directory.
//!
//! Usage:
//!   life-clock                         # use stored settings, or prompt
//!   life-clock --settings              # change stored settings
//!   life-clock --start 20/08/2002 --years 76 --show-age
//!
//! Press Enter to quit.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use life_clock::easing::DEFAULT_ANIMATION_DURATION;
use life_clock::settings::{DISPLAY_DATE_FORMAT, FieldErrors, SettingsForm};
use life_clock::storage::{FileStore, StoredConfig, load_config, save_config};
use life_clock::terminal::TerminalDisplay;
use life_clock::ticker::Ticker;
use life_clock::{
    ClockDisplay, DeadlineVariant, DriverOptions, Easing, EntranceAnimation, LifeClockDriver, PercentagePolicy,
    ServiceTiming, Srgb, SystemClock, Theme,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

/// Tick cadence while the entrance animation runs (~60 FPS).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

static SYSTEM_CLOCK: SystemClock = SystemClock;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EasingArg {
    Linear,
    Smoothstep,
    Expo,
}

impl From<EasingArg> for Easing {
    fn from(arg: EasingArg) -> Self {
        match arg {
            EasingArg::Linear => Easing::Linear,
            EasingArg::Smoothstep => Easing::SmoothStep,
            EasingArg::Expo => Easing::EaseInOutExpo,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "life-clock", version, about = "See your mean lifespan like a clock")]
struct Args {
    /// Start (birth) date, DD/MM/YYYY or YYYY-MM-DD. Overrides stored settings.
    #[arg(long)]
    start: Option<String>,

    /// Lifespan in years, added to the start date.
    #[arg(long, requires = "start", conflicts_with = "end")]
    years: Option<u32>,

    /// Explicit end date, DD/MM/YYYY or YYYY-MM-DD.
    #[arg(long, requires = "start")]
    end: Option<String>,

    /// Open the settings prompt even if settings are stored.
    #[arg(long)]
    settings: bool,

    /// Directory settings are stored in.
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Animate from 00:00 up to the current value on start.
    #[arg(long)]
    animate: bool,

    /// Easing curve of the entrance animation.
    #[arg(long, value_enum, default_value = "expo")]
    easing: EasingArg,

    /// Show seconds.
    #[arg(long)]
    seconds: bool,

    /// Show the estimated age (years-based lifespans only).
    #[arg(long)]
    show_age: bool,

    /// Show 00:00 before the start date instead of counting backwards.
    #[arg(long)]
    clamp_before_start: bool,

    /// Digit hue in degrees.
    #[arg(long, conflicts_with = "color")]
    hue: Option<f32>,

    /// Digit color as hex, e.g. "#ffcc00".
    #[arg(long)]
    color: Option<String>,

    /// Disable ANSI colors.
    #[arg(long)]
    no_color: bool,

    /// Log filter in env_logger syntax (defaults to RUST_LOG, then "warn").
    #[arg(long)]
    log: Option<String>,
}

static LOG_INIT: Once = Once::new();

/// Initializes the global logger once.
fn init_logging(filter: Option<&str>) {
    LOG_INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            // Anything chattier would interleave with the clock line.
            builder.filter_level(log::LevelFilter::Warn);
        }

        builder.init();
        log::debug!("logging initialized");
    });
}

fn config_dir(args: &Args) -> Result<PathBuf> {
    if let Some(dir) = &args.config_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os("LIFE_CLOCK_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var_os("HOME").context("HOME is not set; pass --config-dir")?;
    Ok(PathBuf::from(home).join(".config").join("life-clock"))
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

fn theme(args: &Args) -> Result<Theme> {
    if let Some(hex) = &args.color {
        let rgb = Srgb::<u8>::from_str(hex)
            .map_err(|err| anyhow::anyhow!("invalid color {:?}: {}", hex, err))?;
        return Ok(Theme::from_color(rgb.into_format()));
    }
    Ok(args.hue.map_or_else(Theme::default, Theme::from_hue))
}

/// Reads one line, returning `current` if the user just pressed Enter.
fn ask(input: &mut impl BufRead, label: &str, current: &str) -> Result<String> {
    if current.is_empty() {
        print!("{}: ", label);
    } else {
        print!("{} [{}]: ", label, current);
    }
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed before settings were complete");
    }
    let line = line.trim();
    Ok(if line.is_empty() { current.to_owned() } else { line.to_owned() })
}

fn print_field_errors(errors: &FieldErrors) {
    let fields = [
        ("Start date", errors.start_date),
        ("Deadline years", errors.deadline_years),
        ("Deadline date", errors.deadline_date),
    ];
    for (field, message) in fields {
        if let Some(message) = message {
            println!("  {}: {}", field, message);
        }
    }
}

/// Interactive settings prompt. Loops until the form validates.
fn prompt(
    input: &mut impl BufRead,
    mut form: SettingsForm,
    first_run: bool,
) -> Result<SettingsForm> {
    println!("{}", if first_run { "Welcome" } else { "Settings" });
    println!("Visualize your life's journey through a unique 24-hour perspective.");
    println!("Your settings are only stored on this device.");

    loop {
        form.start_date = ask(input, "Start date (DD/MM/YYYY)", &form.start_date)?;

        let variant = match form.variant {
            DeadlineVariant::Age => "years",
            DeadlineVariant::Date => "date",
        };
        form.variant = match ask(input, "Deadline input format (years/date)", variant)?.as_str() {
            "date" | "d" => DeadlineVariant::Date,
            _ => DeadlineVariant::Age,
        };

        match form.variant {
            DeadlineVariant::Age => {
                form.deadline_years = ask(input, "Deadline years span", &form.deadline_years)?;
            }
            DeadlineVariant::Date => {
                form.deadline_date =
                    ask(input, "Deadline date (DD/MM/YYYY)", &form.deadline_date)?;
            }
        }

        match form.validate(today()) {
            Ok(_) => return Ok(form),
            Err(errors) => print_field_errors(&errors),
        }
    }
}

/// Form built from command-line flags, if `--start` was given.
fn form_from_args(args: &Args) -> Option<SettingsForm> {
    let start = args.start.clone()?;
    let mut form = SettingsForm {
        start_date: start,
        ..SettingsForm::default()
    };
    if let Some(end) = &args.end {
        form.variant = DeadlineVariant::Date;
        form.deadline_date = end.clone();
    } else if let Some(years) = args.years {
        form.deadline_years = years.to_string();
    }
    Some(form)
}

/// Settings from flags, storage or the prompt, in that order.
///
/// Flags that fail validation are reported and then corrected interactively.
fn resolve_config(
    args: &Args,
    store: &mut FileStore,
    input: &mut impl BufRead,
) -> Result<StoredConfig> {
    let stored = load_config(store).context("failed to read stored settings")?;

    let form = match (form_from_args(args), stored) {
        (Some(form), stored) => match form.validate(today()) {
            Ok(_) => form,
            Err(errors) => {
                println!("The given settings are invalid:");
                print_field_errors(&errors);
                prompt(input, form, stored.is_none())?
            }
        },
        (None, Some(config)) if !args.settings => return Ok(config),
        (None, Some(config)) => prompt(input, SettingsForm::from_config(&config), false)?,
        (None, None) => prompt(input, SettingsForm::default(), true)?,
    };

    let settings = form
        .validate(today())
        .map_err(|errors| anyhow::anyhow!("invalid settings: {}", errors))?;
    let config = save_config(store, &settings).context("failed to store settings")?;
    log::info!(
        "stored settings in {} (start {})",
        store.dir().display(),
        config.start_date.format(DISPLAY_DATE_FORMAT)
    );
    Ok(config)
}

fn delay_for(timing: ServiceTiming) -> Duration {
    match timing {
        ServiceTiming::Continuous => FRAME_INTERVAL,
        ServiceTiming::Delay(delay) => delay,
    }
}

type SharedDriver<D> = Arc<Mutex<LifeClockDriver<'static, D, SystemClock>>>;

/// Mounts the clock, ticks it until a line is read, then unmounts it.
fn run_until_enter<D>(driver: &SharedDriver<D>, input: &mut impl BufRead) -> Result<()>
where
    D: ClockDisplay + Send + 'static,
{
    let first_delay = {
        let mut driver = driver
            .lock()
            .map_err(|_| anyhow::anyhow!("clock state is poisoned"))?;
        delay_for(driver.mount()?)
    };

    let ticking = Arc::clone(driver);
    let handle = Ticker::start(first_delay, move || {
        let mut driver = ticking.lock().ok()?;
        match driver.tick() {
            Ok(timing) => Some(delay_for(timing)),
            Err(err) => {
                log::warn!("clock stopped: {}", err);
                None
            }
        }
    })
    .context("failed to start the clock timer")?;

    // Block until Enter (or end of input).
    let mut line = String::new();
    let read = input.read_line(&mut line);
    handle.cancel();

    match driver.lock() {
        Ok(mut driver) => driver.unmount(),
        Err(_) => log::warn!("clock state is poisoned; skipping unmount"),
    }
    read?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref());

    let mut store = FileStore::new(config_dir(&args)?);
    let config = resolve_config(&args, &mut store, &mut io::stdin().lock())?;

    let policy = if args.clamp_before_start {
        PercentagePolicy::ClampBeforeStart
    } else {
        PercentagePolicy::Unclamped
    };
    let clock = config.to_clock(policy).context("stored settings describe an empty lifespan")?;

    let options = DriverOptions {
        show_seconds: args.seconds,
        show_age: args.show_age,
        animation: args
            .animate
            .then(|| EntranceAnimation::new(DEFAULT_ANIMATION_DURATION, args.easing.into())),
        ..DriverOptions::default()
    };

    let mut display = TerminalDisplay::new(io::stdout(), theme(&args)?);
    if args.no_color {
        display = display.without_color();
    }

    let driver = Arc::new(Mutex::new(LifeClockDriver::with_options(
        display,
        &SYSTEM_CLOCK,
        clock,
        options,
    )));
    run_until_enter(&driver, &mut io::stdin().lock())?;
    println!();

    Ok(())
}
