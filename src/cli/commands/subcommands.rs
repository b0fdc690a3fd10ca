use clap::Subcommand;

/// Locator normalization subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum NormalizeCommands {
    /// Style document locator
    Style {
        locator: String,
        /// Access token overriding the configured one
        #[arg(long)]
        token: Option<String>,
    },
    /// Glyph range locator (`{fontstack}`/`{range}` placeholders survive)
    Glyphs {
        locator: String,
        #[arg(long)]
        token: Option<String>,
    },
    /// Tile source (TileJSON) locator
    Source {
        locator: String,
        #[arg(long)]
        token: Option<String>,
    },
    /// Sprite sheet locator
    Sprite {
        locator: String,
        /// Density suffix, e.g. "@2x"
        #[arg(long, default_value = "")]
        format: String,
        /// File type, ".json" or ".png"
        #[arg(long, default_value = ".json")]
        extension: String,
        #[arg(long)]
        token: Option<String>,
    },
    /// Tile locator as requested by a device
    Tile {
        tile: String,
        /// Locator of the source the tile belongs to
        #[arg(long)]
        source: Option<String>,
        /// Tile size in pixels (512 selects the high-density variant)
        #[arg(long)]
        tile_size: Option<u32>,
        /// Device pixel ratio
        #[arg(long, default_value = "1.0")]
        pixel_ratio: f64,
        /// Device decodes WebP
        #[arg(long)]
        webp: bool,
    },
    /// Strip a tile locator back to its private-scheme form
    Canonical { tile: String },
}

/// Telemetry reporting subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ReportCommands {
    /// A rendering subject finished loading its resources
    Load {
        /// Resource locators; only first-party HTTP(S) ones make a report eligible
        #[arg(required = true)]
        resources: Vec<String>,
        /// Identifier of the rendering subject
        #[arg(long, default_value = "1")]
        subject_id: u64,
    },
    /// Periodic activity tick
    Usage {
        #[arg(required = true)]
        resources: Vec<String>,
    },
}
