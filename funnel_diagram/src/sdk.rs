//! SDK entry points and builder for composing the funnel explorer app.

use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config;
use crate::data::{init_source_channel, RecordBuffer, SourceConfig, SourceKind};
use crate::diagram::{diagram_plugin, link_plugin, ParticleRng, ParticleSettings, Theme};
use crate::render::{ArtistResource, NodeArtist};
use crate::ui::{hud_plugin, summary_plugin};

/// Builder for constructing a Cascade app with customizable plugins.
pub struct FunnelExplorerBuilder {
    source: Option<SourceConfig>,
    artist: Option<Box<dyn NodeArtist>>,
    window_title: String,
    window_resolution: (f32, f32),
    theme: Option<Theme>,
    record: Option<PathBuf>,
    particles_enabled: bool,
    enable_hud: bool,
    enable_summary: bool,
    enable_links: bool,
}

impl Default for FunnelExplorerBuilder {
    fn default() -> Self {
        Self {
            source: None,
            artist: None,
            window_title: "Cascade".to_string(),
            window_resolution: (1280.0, 720.0),
            theme: None,
            record: None,
            particles_enabled: true,
            enable_hud: true,
            enable_summary: true,
            enable_links: true,
        }
    }
}

impl FunnelExplorerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit source configuration.
    pub fn source(mut self, config: SourceConfig) -> Self {
        self.source = Some(config);
        self
    }

    /// Replay a recorded fixture file.
    pub fn fixture(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(SourceConfig {
            kind: SourceKind::Fixture(path.into()),
            interval: Duration::from_millis(800),
            seed: 0,
        });
        self
    }

    /// Run the simulated source with an explicit seed and pacing.
    pub fn simulated(mut self, seed: u64, interval: Duration) -> Self {
        self.source = Some(SourceConfig {
            kind: SourceKind::Simulated,
            interval,
            seed,
        });
        self
    }

    /// Load source, theme, and record settings from environment variables.
    pub fn env_config(mut self) -> Self {
        self.source = Some(config::source_config());
        self.theme = Some(config::theme_config());
        self.record = config::record_path();
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Provide a custom node artist implementation.
    pub fn artist(mut self, artist: impl NodeArtist) -> Self {
        self.artist = Some(Box::new(artist));
        self
    }

    /// Record every ingested snapshot to a replayable fixture file.
    pub fn record(mut self, path: impl Into<PathBuf>) -> Self {
        self.record = Some(path.into());
        self
    }

    pub fn disable_particles(mut self) -> Self {
        self.particles_enabled = false;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_summary(mut self) -> Self {
        self.enable_summary = false;
        self
    }

    pub fn disable_links(mut self) -> Self {
        self.enable_links = false;
        self
    }

    /// Build the Bevy app with the selected configuration and plugins.
    pub fn build(self) -> App {
        let source = self.source.unwrap_or_else(config::source_config);
        let theme = self.theme.unwrap_or_else(config::theme_config);
        let seed = source.seed;
        let channel = init_source_channel(source);

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(theme.background()))
        .insert_resource(theme)
        .insert_resource(channel)
        .insert_resource(ParticleRng(StdRng::seed_from_u64(seed)))
        .insert_resource(ParticleSettings {
            enabled: self.particles_enabled,
        });

        if let Some(artist) = self.artist {
            artist.setup(&mut app);
            app.insert_resource(ArtistResource(artist));
        }
        if let Some(path) = self.record {
            app.insert_resource(RecordBuffer::new(path));
        }

        app.add_plugins(diagram_plugin);
        if self.enable_links {
            app.add_plugins(link_plugin);
        }
        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }
        if self.enable_summary {
            app.add_plugins(summary_plugin);
        }

        app
    }
}
