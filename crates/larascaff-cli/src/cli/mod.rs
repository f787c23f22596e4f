//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "larascaff",
    bin_name = "larascaff",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Laravel package scaffolding",
    long_about = "Larascaff generates Laravel packages, Filament plugins, \
                  Orchestra Workbench setups and Pest test harnesses, and \
                  links local packages into your application's composer.json.",
    after_help = "EXAMPLES:\n\
        \x20 larascaff package acme/widgets --all\n\
        \x20 larascaff plugin acme/filament-blog --with-resource Post --with-page\n\
        \x20 larascaff testing acme/widgets --with-ci --with-coverage\n\
        \x20 larascaff completions bash > /usr/share/bash-completion/completions/larascaff",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a Laravel package under `packages/<vendor>/<name>`.
    #[command(
        visible_alias = "pkg",
        about = "Create a new Laravel package",
        after_help = "EXAMPLES:\n\
            \x20 larascaff package acme/widgets\n\
            \x20 larascaff package acme/widgets --with-routes --with-views\n\
            \x20 larascaff package acme/widgets --all --with-playwright --dry-run"
    )]
    Package(PackageArgs),

    /// Create a Filament panel plugin.
    #[command(
        about = "Create a new Filament plugin",
        after_help = "EXAMPLES:\n\
            \x20 larascaff plugin acme/filament-blog\n\
            \x20 larascaff plugin acme/filament-blog --with-resource Post --with-widget\n\
            \x20 larascaff plugin acme/filament-blog --with-page --no-pest"
    )]
    Plugin(PluginArgs),

    /// Add an Orchestra Workbench app to an existing package.
    #[command(
        about = "Add Orchestra Workbench to a package",
        after_help = "EXAMPLES:\n\
            \x20 larascaff workbench acme/widgets\n\
            \x20 larascaff workbench acme/widgets --project-root ../app"
    )]
    Workbench(WorkbenchArgs),

    /// Add a Pest test harness to an existing package.
    #[command(
        about = "Add Pest testing to a package",
        after_help = "EXAMPLES:\n\
            \x20 larascaff testing acme/widgets\n\
            \x20 larascaff testing acme/widgets --with-ci --with-coverage"
    )]
    Testing(TestingArgs),

    /// Register a local package as a path repository in `composer.json`.
    #[command(
        about = "Link a local package into the project",
        after_help = "EXAMPLES:\n\
            \x20 larascaff link acme/widgets\n\
            \x20 larascaff link acme/widgets --project-root ~/code/app"
    )]
    Link(LinkArgs),

    /// Initialise a Larascaff configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 larascaff init\n\
            \x20 larascaff init --force\n\
            \x20 larascaff --config ./larascaff.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 larascaff completions bash > ~/.local/share/bash-completion/completions/larascaff\n\
            \x20 larascaff completions zsh  > ~/.zfunc/_larascaff\n\
            \x20 larascaff completions fish > ~/.config/fish/completions/larascaff.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Larascaff configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 larascaff config get author.name\n\
            \x20 larascaff config set author.email ada@example.com\n\
            \x20 larascaff config list"
    )]
    Config(ConfigCommands),
}

// ── shared argument groups ────────────────────────────────────────────────────

/// The package being scaffolded and where its Laravel app lives.
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// Composer package name.
    #[arg(value_name = "VENDOR/NAME", help = "Package name, e.g. acme/widgets")]
    pub package: String,

    /// Laravel application root holding `composer.json` and `packages/`.
    #[arg(
        long = "project-root",
        value_name = "DIR",
        help = "Laravel project root (default: current directory)"
    )]
    pub project_root: Option<PathBuf>,

    /// Print the planned files without writing anything.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── package ───────────────────────────────────────────────────────────────────

/// Arguments for `larascaff package`.
#[derive(Debug, Args)]
pub struct PackageArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[arg(long = "with-routes", help = "Add routes/web.php and routes/api.php")]
    pub with_routes: bool,

    #[arg(long = "with-views", help = "Add a resources/views directory")]
    pub with_views: bool,

    #[arg(long = "with-migrations", help = "Add a database/migrations directory")]
    pub with_migrations: bool,

    #[arg(long = "with-commands", help = "Add an install Artisan command")]
    pub with_commands: bool,

    #[arg(long = "with-playwright", help = "Add Playwright browser tests")]
    pub with_playwright: bool,

    /// Shorthand for routes, views, migrations and commands.
    #[arg(long = "all", help = "Enable routes, views, migrations and commands")]
    pub all: bool,

    #[arg(long = "no-link", help = "Do not register the package in composer.json")]
    pub no_link: bool,
}

// ── plugin ────────────────────────────────────────────────────────────────────

/// Arguments for `larascaff plugin`.
#[derive(Debug, Args)]
pub struct PluginArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Model name for an example resource (e.g. `Post`).
    #[arg(
        long = "with-resource",
        value_name = "NAME",
        help = "Add a Filament resource for NAME"
    )]
    pub with_resource: Option<String>,

    #[arg(long = "with-page", help = "Add a settings page")]
    pub with_page: bool,

    #[arg(long = "with-widget", help = "Add a stats overview widget")]
    pub with_widget: bool,

    #[arg(long = "no-pest", help = "Skip the Pest test setup")]
    pub no_pest: bool,

    #[arg(long = "no-link", help = "Do not register the plugin in composer.json")]
    pub no_link: bool,
}

// ── workbench ─────────────────────────────────────────────────────────────────

/// Arguments for `larascaff workbench`.
#[derive(Debug, Args)]
pub struct WorkbenchArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

// ── testing ───────────────────────────────────────────────────────────────────

/// Arguments for `larascaff testing`.
#[derive(Debug, Args)]
pub struct TestingArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[arg(long = "with-coverage", help = "Collect coverage in CI and upload to Codecov")]
    pub with_coverage: bool,

    #[arg(long = "with-ci", help = "Add a GitHub Actions workflow")]
    pub with_ci: bool,
}

// ── link ──────────────────────────────────────────────────────────────────────

/// Arguments for `larascaff link`.
#[derive(Debug, Args)]
pub struct LinkArgs {
    #[arg(value_name = "VENDOR/NAME", help = "Package name, e.g. acme/widgets")]
    pub package: String,

    #[arg(
        long = "project-root",
        value_name = "DIR",
        help = "Laravel project root (default: current directory)"
    )]
    pub project_root: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `larascaff init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `larascaff completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `larascaff config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `author.name`.
        key: String,
    },
    /// Set a configuration key in the config file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
