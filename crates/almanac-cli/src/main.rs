mod server;

use std::path::{Path, PathBuf};

use almanac_core::{
    BirthChart, CalendarInfo, CycleRange, CycleReport, DaySummary, DressSuggestion, ElementRelation,
    Engine, EnergyGuidance, HealthReport, MonthExtremes, SeasonHealth, TrendDay,
};
use almanac_store::{Store, open_engine, read_snapshot_file, resolve_data_dir, write_snapshot_file};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rmcp::{ServiceExt, transport::stdio};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "almanac",
    about = "Deterministic date-derived cycles, calendar readings and suggestions"
)]
struct Cli {
    /// Data directory (defaults to $ALMANAC_DATA_DIR, then ~/.almanac)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server on stdio transport
    Serve,

    /// Cycle values for one day
    Cycle {
        /// Anchor (birth) date, YYYY-MM-DD
        anchor: String,
        /// Target date (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Cycle values over a date range
    Range {
        /// Anchor (birth) date, YYYY-MM-DD
        anchor: String,
        /// First date (inclusive); requires --to
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Last date (inclusive); requires --from
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Window centre when no --from/--to is given (defaults to today)
        #[arg(long, conflicts_with_all = ["from", "to"])]
        center: Option<String>,
        /// Days before the centre
        #[arg(long, default_value_t = 15)]
        before: u32,
        /// Days after the centre
        #[arg(long, default_value_t = 15)]
        after: u32,
    },

    /// Best and worst combined day of a month
    Extremes {
        /// Anchor (birth) date, YYYY-MM-DD
        anchor: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u8,
    },

    /// Seven days of cycle values
    Trend {
        /// Anchor (birth) date, YYYY-MM-DD
        anchor: String,
        /// First day (defaults to today)
        #[arg(long)]
        from: Option<String>,
    },

    /// Outlook and per-cycle status for one day
    Summary {
        /// Anchor (birth) date, YYYY-MM-DD
        anchor: String,
        /// Target date (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Daily calendar page
    Calendar {
        /// Date (defaults to today)
        date: Option<String>,
    },

    /// Birth chart for an anchor date
    Birth {
        /// Anchor (birth) date, YYYY-MM-DD
        anchor: String,
    },

    /// Dress and food suggestions
    Dress {
        /// Date (defaults to today)
        date: Option<String>,
    },

    /// Zodiac energy guidance
    Energy {
        /// Animal name (e.g. goat) or birth year (e.g. 1991)
        zodiac: String,
        /// Date (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Element relation, against the day's element when only one is given
    Relation {
        /// Element name (wood, fire, earth, metal, water)
        from: String,
        /// Second element name
        to: Option<String>,
        /// Date whose daily element stands in for <TO> (defaults to today)
        #[arg(long, conflicts_with = "to")]
        date: Option<String>,
    },

    /// Seasonal health guidance and the organ clock
    Season {
        /// Date (defaults to today)
        date: Option<String>,
        /// Hour of day, 0-23 (defaults to the local hour)
        #[arg(long)]
        hour: Option<u8>,
    },

    /// Manage recorded anchor dates
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show engine health
    Health,

    /// Export history to a JSON file
    Export {
        /// Output file path
        path: PathBuf,
    },

    /// Import history from a JSON file (current or legacy user_config.json layout)
    Import {
        /// Input file path
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List anchors, most recent first
    List,
    /// Record an anchor
    Record { anchor: String },
    /// Remove an anchor (the default stays)
    Remove { anchor: String },
    /// Remove every anchor except the default
    Clear,
}

fn open(cli: &Cli) -> Result<Engine<Store>> {
    let dir = resolve_data_dir(cli.data_dir.as_deref());
    open_engine(&dir).with_context(|| format!("failed to open data directory {}", dir.display()))
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Serve => cmd_serve(&cli).await,
        Commands::Cycle { anchor, date } => cmd_cycle(&cli, anchor, date.as_deref()),
        Commands::Range {
            anchor,
            from,
            to,
            center,
            before,
            after,
        } => cmd_range(
            &cli,
            anchor,
            from.as_deref().zip(to.as_deref()),
            center.as_deref(),
            (*before, *after),
        ),
        Commands::Extremes {
            anchor,
            year,
            month,
        } => cmd_extremes(&cli, anchor, *year, *month),
        Commands::Trend { anchor, from } => cmd_trend(&cli, anchor, from.as_deref()),
        Commands::Summary { anchor, date } => cmd_summary(&cli, anchor, date.as_deref()),
        Commands::Calendar { date } => cmd_calendar(&cli, date.as_deref()),
        Commands::Birth { anchor } => cmd_birth(&cli, anchor),
        Commands::Dress { date } => cmd_dress(&cli, date.as_deref()),
        Commands::Energy { zodiac, date } => cmd_energy(&cli, zodiac, date.as_deref()),
        Commands::Relation { from, to, date } => {
            cmd_relation(&cli, from, to.as_deref(), date.as_deref())
        }
        Commands::Season { date, hour } => cmd_season(&cli, date.as_deref(), *hour),
        Commands::History { action } => cmd_history(&cli, action),
        Commands::Health => cmd_health(&cli),
        Commands::Export { path } => cmd_export(&cli, path),
        Commands::Import { path } => cmd_import(&cli, path),
    }
}

async fn cmd_serve(cli: &Cli) -> Result<()> {
    let engine = open(cli)?;
    tracing::info!("starting MCP server");

    let server = server::AlmanacServer::new(engine);
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

fn print_json(value: &impl Serialize) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("failed to serialize output")?
    );
    Ok(())
}

/// The serialized tag of a unit enum value, e.g. `generatedBy`.
fn tag(value: &impl Serialize) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

fn print_list(label: &str, items: &[String]) {
    println!("{label}:");
    for item in items {
        println!("  - {item}");
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_cycle(cli: &Cli, anchor: &str, date: Option<&str>) -> Result<()> {
    let mut engine = open(cli)?;
    let report = engine.get_cycle_values(anchor, date)?;
    if cli.json {
        return print_json(&report);
    }
    print_cycle(&report);
    Ok(())
}

fn print_cycle(r: &CycleReport) {
    println!("anchor:       {}", r.anchor);
    println!("date:         {}", r.target);
    println!("days:         {}", r.offset);
    println!("physical:     {}", r.values.physical);
    println!("emotional:    {}", r.values.emotional);
    println!("intellectual: {}", r.values.intellectual);
    println!("combined:     {:.1}", r.combined);
    println!("outlook:      {}", tag(&r.outlook));
}

fn cmd_range(
    cli: &Cli,
    anchor: &str,
    bounds: Option<(&str, &str)>,
    center: Option<&str>,
    (before, after): (u32, u32),
) -> Result<()> {
    let mut engine = open(cli)?;
    let range = match bounds {
        Some((from, to)) => engine.get_cycle_range(anchor, from, to)?,
        None => engine.get_cycle_window(anchor, center, before, after)?,
    };
    if cli.json {
        return print_json(&range);
    }
    print_range(&range);
    Ok(())
}

fn print_range(r: &CycleRange) {
    println!("date        physical  emotional  intellectual");
    for i in 0..r.len() {
        println!(
            "{}  {:>8}  {:>9}  {:>12}",
            r.dates[i], r.physical[i], r.emotional[i], r.intellectual[i]
        );
    }
}

fn cmd_extremes(cli: &Cli, anchor: &str, year: i32, month: u8) -> Result<()> {
    let mut engine = open(cli)?;
    let extremes = engine.get_month_extremes(anchor, year, month)?;
    if cli.json {
        return print_json(&extremes);
    }
    print_extremes(&extremes);
    Ok(())
}

fn print_extremes(e: &MonthExtremes) {
    println!("best:  {} ({:.1})", e.best.date, e.best.combined);
    println!("worst: {} ({:.1})", e.worst.date, e.worst.combined);
}

fn cmd_trend(cli: &Cli, anchor: &str, from: Option<&str>) -> Result<()> {
    let mut engine = open(cli)?;
    let trend = engine.get_weekly_trend(anchor, from)?;
    if cli.json {
        return print_json(&trend);
    }
    print_trend(&trend);
    Ok(())
}

fn print_trend(days: &[TrendDay]) {
    println!("date        day        physical  emotional  intellectual");
    for d in days {
        println!(
            "{}  {:<9}  {:>8}  {:>9}  {:>12}",
            d.date,
            d.weekday.name(),
            d.values.physical,
            d.values.emotional,
            d.values.intellectual
        );
    }
}

fn cmd_summary(cli: &Cli, anchor: &str, date: Option<&str>) -> Result<()> {
    let mut engine = open(cli)?;
    let summary = engine.get_day_summary(anchor, date)?;
    if cli.json {
        return print_json(&summary);
    }
    print_summary(&summary);
    Ok(())
}

fn print_summary(s: &DaySummary) {
    println!("date:         {}", s.date);
    println!("outlook:      {} ({})", s.title, tag(&s.outlook));
    println!("total:        {}", s.total);
    println!("physical:     {}", tag(&s.status.physical));
    println!("emotional:    {}", tag(&s.status.emotional));
    println!("intellectual: {}", tag(&s.status.intellectual));
    println!("{}", s.description);
}

fn cmd_calendar(cli: &Cli, date: Option<&str>) -> Result<()> {
    let engine = open(cli)?;
    let info = engine.get_calendar_info(date)?;
    if cli.json {
        return print_json(&info);
    }
    print_calendar(&info);
    Ok(())
}

fn print_calendar(info: &CalendarInfo) {
    println!("date:     {} ({})", info.date, info.weekday.name());
    println!("kin:      {} {}", info.position.ordinal, info.full_name);
    println!("moon:     {}, day {}", info.moon.name, info.moon.day);
    if let Some(marker) = info.seasonal_marker {
        println!("marker:   {}", marker.name());
    }
    println!(
        "lucky:    colour {}, number {}, food {}",
        info.lucky.color, info.lucky.number, info.lucky.food
    );
    println!("message:  {}", info.message);
    println!("quote:    {}", info.quote);
    print_list("suggestions", &info.suggestions);
    print_list("avoid", &info.avoidances);
    println!("energy:");
    for r in &info.energy {
        println!(
            "  {:<8} {:>3} {:<7} {}",
            r.category.key(),
            r.score,
            tag(&r.band),
            r.advice
        );
    }
}

fn cmd_birth(cli: &Cli, anchor: &str) -> Result<()> {
    let mut engine = open(cli)?;
    let chart = engine.get_birth_chart(anchor)?;
    if cli.json {
        return print_json(&chart);
    }
    print_birth(&chart);
    Ok(())
}

fn print_birth(c: &BirthChart) {
    println!("date:      {} ({})", c.date, c.weekday.name());
    println!("kin:       {} {}", c.position.ordinal, c.full_name);
    println!("purpose:   {}", c.purpose);
    println!("strengths: {}", c.strengths.join(", "));
    println!(
        "primary:   {} - {}",
        c.primary_field.name, c.primary_field.description
    );
    println!(
        "secondary: {} - {}",
        c.secondary_field.name, c.secondary_field.description
    );
    println!("balance:   {}", c.balance);
}

fn cmd_dress(cli: &Cli, date: Option<&str>) -> Result<()> {
    let engine = open(cli)?;
    let suggestion = engine.get_dress_suggestion(date)?;
    if cli.json {
        return print_json(&suggestion);
    }
    print_dress(&suggestion);
    Ok(())
}

fn print_dress(s: &DressSuggestion) {
    println!("date:        {} ({})", s.date, s.weekday.name());
    println!("element:     {}", s.daily_element);
    println!("star colour: {}", s.star_color);
    println!("recommended: {}", s.recommended_systems.join(", "));
    println!("colours:");
    for c in &s.color_suggestions {
        println!(
            "  {} [{}] {} / {}: {}",
            c.system,
            c.colors.join(", "),
            tag(&c.relation),
            tag(&c.luck),
            c.description
        );
    }
    print_list("favour", &s.food_suggestions.favor);
    print_list("avoid", &s.food_suggestions.avoid);
}

fn cmd_energy(cli: &Cli, zodiac: &str, date: Option<&str>) -> Result<()> {
    let engine = open(cli)?;
    let guidance = engine.get_energy_guidance(zodiac, date)?;
    if cli.json {
        return print_json(&guidance);
    }
    print_energy(&guidance);
    Ok(())
}

fn print_energy(g: &EnergyGuidance) {
    println!("date:       {}", g.date);
    println!("zodiac:     {} ({})", g.zodiac, g.user_element);
    println!("day:        {}", g.daily_element);
    println!(
        "match:      {} ({})",
        g.energy_match.score,
        tag(&g.energy_match.relation)
    );
    let compatible: Vec<String> = g.compatible_zodiacs.iter().map(ToString::to_string).collect();
    println!("compatible: {}", compatible.join(", "));
    println!("colours:    {}", g.lifestyle.colors.join(", "));
    println!("directions: {}", g.lifestyle.directions.join(", "));
    println!("boost:      {}", g.lifestyle.boost);
    println!("home:       {}", g.lifestyle.home);
    println!("advice:     {}", g.relationship_advice);
}

fn cmd_relation(cli: &Cli, from: &str, to: Option<&str>, date: Option<&str>) -> Result<()> {
    let engine = open(cli)?;
    let relation = engine.element_relation(from, to, date)?;
    if cli.json {
        return print_json(&relation);
    }
    print_relation(&relation);
    Ok(())
}

fn print_relation(r: &ElementRelation) {
    println!("{}", r.summary);
    println!("relation: {}", tag(&r.relation));
    println!("score:    {}", r.score);
}

fn cmd_season(cli: &Cli, date: Option<&str>, hour: Option<u8>) -> Result<()> {
    let engine = open(cli)?;
    let health = engine.get_season_health(date, hour)?;
    if cli.json {
        return print_json(&health);
    }
    print_season(&health);
    Ok(())
}

fn print_season(h: &SeasonHealth) {
    let w = &h.organ_clock;
    println!("date:    {}", h.date);
    println!("season:  {} ({})", h.season.name(), h.element);
    println!("organs:  {}", h.organs);
    println!("{}", h.characteristics);
    println!("advice:");
    for line in h.advice {
        println!("  - {line}");
    }
    println!("care:    {}", h.care.focus);
    println!("colours: {}", h.care.colors.join(", "));
    println!("foods:   {}", h.care.foods.join(", "));
    println!(
        "clock:   {:02}:00-{:02}:00 {}: {}",
        w.start_hour, w.end_hour, w.organ, w.description
    );
    println!("         {} {}", w.suggestion, w.health_tip);
}

fn cmd_history(cli: &Cli, action: &HistoryAction) -> Result<()> {
    let mut engine = open(cli)?;
    match action {
        HistoryAction::List => {}
        HistoryAction::Record { anchor } => {
            engine
                .record_anchor(anchor)
                .context("failed to record anchor")?;
        }
        HistoryAction::Remove { anchor } => {
            if !engine
                .remove_from_history(anchor)
                .context("failed to remove anchor")?
            {
                eprintln!("{anchor} not removed (absent or default)");
            }
        }
        HistoryAction::Clear => engine.clear_history().context("failed to clear history")?,
    }

    if cli.json {
        return print_json(&engine.history_entries());
    }
    for entry in engine.history_entries() {
        let marker = if entry.is_default { " (default)" } else { "" };
        println!("{}  used {}{marker}", entry.anchor_date, entry.use_count);
    }
    Ok(())
}

fn cmd_health(cli: &Cli) -> Result<()> {
    let engine = open(cli)?;
    let report = engine.health_check();
    if cli.json {
        return print_json(&report);
    }
    print_health(&report);
    Ok(())
}

fn print_health(h: &HealthReport) {
    let ready = |b: bool| if b { "ready" } else { "not ready" };
    println!("status:      {}", tag(&h.status));
    println!("engine:      {}", ready(h.services_ready.engine));
    println!("content:     {}", ready(h.services_ready.content));
    println!("persistence: {}", ready(h.services_ready.persistence));
    if !h.missing_pools.is_empty() {
        println!("missing:     {}", h.missing_pools.join(", "));
    }
}

fn cmd_export(cli: &Cli, path: &Path) -> Result<()> {
    let engine = open(cli)?;
    write_snapshot_file(path, &engine.export_snapshot())
        .with_context(|| format!("failed to export to {}", path.display()))?;
    println!("exported to {}", path.display());
    Ok(())
}

fn cmd_import(cli: &Cli, path: &Path) -> Result<()> {
    let mut engine = open(cli)?;
    let snapshot = read_snapshot_file(path).context("failed to read snapshot")?;
    engine
        .import_snapshot(snapshot)
        .context("failed to import history")?;
    println!(
        "imported from {}. entries={}",
        path.display(),
        engine.list_history().len()
    );
    Ok(())
}
