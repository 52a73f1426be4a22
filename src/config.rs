// src/config.rs

/// Configuration for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub top_n: usize,
    pub format: ReportFormat,
    pub color: ColorMode,
    pub debug: bool,
    pub buffer_size: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            top_n: 5,
            format: ReportFormat::default(),
            color: ColorMode::default(),
            debug: false,
            buffer_size: 65536, // 64KB
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum ReportFormat {
    #[value(name = "text", help = "Human-readable console report")]
    Text,
    #[value(name = "json", help = "JSON object with counters and derived metrics")]
    Json,
}

impl Default for ReportFormat {
    fn default() -> Self {
        ReportFormat::Text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum ColorMode {
    #[value(name = "auto", help = "Color when stdout is a terminal")]
    Auto,
    #[value(name = "always")]
    Always,
    #[value(name = "never")]
    Never,
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Auto
    }
}
