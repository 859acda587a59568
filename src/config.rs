// =============================================================================
// Engine parameters — per-family periods, signal thresholds, analysis knobs
// =============================================================================
//
// Every tunable the engine exposes lives here with its documented default, so
// the API layer can deserialize overrides from a request body and fall back
// field-by-field.  All fields carry `#[serde(default)]` so that adding new
// knobs never breaks loading an older payload.

use serde::{Deserialize, Serialize};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_ma_periods() -> Vec<u32> {
    vec![5, 10, 20, 30, 60, 120, 250]
}

fn default_ema_periods() -> Vec<u32> {
    vec![12, 26]
}

fn default_boll_period() -> u32 {
    20
}

fn default_boll_width() -> f64 {
    2.0
}

fn default_rsi_periods() -> Vec<u32> {
    vec![6, 12, 24]
}

fn default_kdj_period() -> u32 {
    9
}

fn default_kdj_smooth() -> u32 {
    3
}

fn default_macd_fast() -> u32 {
    12
}

fn default_macd_slow() -> u32 {
    26
}

fn default_macd_signal() -> u32 {
    9
}

fn default_vol_ma_periods() -> Vec<u32> {
    vec![5, 10, 20]
}

fn default_kdj_overbought() -> f64 {
    80.0
}

fn default_kdj_oversold() -> f64 {
    20.0
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_volatility_window() -> usize {
    20
}

fn default_trading_days() -> f64 {
    252.0
}

fn default_anomaly_sigma() -> f64 {
    2.0
}

fn default_level_window() -> usize {
    20
}

fn default_level_count() -> usize {
    3
}

// =============================================================================
// Parameter structs
// =============================================================================

/// Window/period overrides for the indicator engine (§ defaults above).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorParams {
    #[serde(default = "default_ma_periods")]
    pub ma_periods: Vec<u32>,
    #[serde(default = "default_ema_periods")]
    pub ema_periods: Vec<u32>,
    #[serde(default = "default_boll_period")]
    pub boll_period: u32,
    #[serde(default = "default_boll_width")]
    pub boll_width: f64,
    #[serde(default = "default_rsi_periods")]
    pub rsi_periods: Vec<u32>,
    #[serde(default = "default_kdj_period")]
    pub kdj_period: u32,
    #[serde(default = "default_kdj_smooth")]
    pub kdj_smooth_k: u32,
    #[serde(default = "default_kdj_smooth")]
    pub kdj_smooth_d: u32,
    #[serde(default = "default_macd_fast")]
    pub macd_fast: u32,
    #[serde(default = "default_macd_slow")]
    pub macd_slow: u32,
    #[serde(default = "default_macd_signal")]
    pub macd_signal: u32,
    #[serde(default = "default_vol_ma_periods")]
    pub vol_ma_periods: Vec<u32>,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ma_periods: default_ma_periods(),
            ema_periods: default_ema_periods(),
            boll_period: default_boll_period(),
            boll_width: default_boll_width(),
            rsi_periods: default_rsi_periods(),
            kdj_period: default_kdj_period(),
            kdj_smooth_k: default_kdj_smooth(),
            kdj_smooth_d: default_kdj_smooth(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            vol_ma_periods: default_vol_ma_periods(),
        }
    }
}

/// Overbought/oversold thresholds used by the signal classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalThresholds {
    #[serde(default = "default_kdj_overbought")]
    pub kdj_overbought: f64,
    #[serde(default = "default_kdj_oversold")]
    pub kdj_oversold: f64,
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            kdj_overbought: default_kdj_overbought(),
            kdj_oversold: default_kdj_oversold(),
            rsi_overbought: default_rsi_overbought(),
            rsi_oversold: default_rsi_oversold(),
        }
    }
}

/// Knobs for the statistical analysis engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Trailing window for "current" volatility and for the volume-anomaly
    /// baseline, in bars.
    #[serde(default = "default_volatility_window")]
    pub volatility_window: usize,
    /// Annualization constant (trading days per year).
    #[serde(default = "default_trading_days")]
    pub trading_days: f64,
    /// A bar's volume is anomalous when it deviates from its trailing mean by
    /// more than this many trailing standard deviations.
    #[serde(default = "default_anomaly_sigma")]
    pub volume_anomaly_sigma: f64,
    /// Half-window for local-extrema detection in support/resistance.
    #[serde(default = "default_level_window")]
    pub level_window: usize,
    /// How many support and resistance levels to report.
    #[serde(default = "default_level_count")]
    pub level_count: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            volatility_window: default_volatility_window(),
            trading_days: default_trading_days(),
            volume_anomaly_sigma: default_anomaly_sigma(),
            level_window: default_level_window(),
            level_count: default_level_count(),
        }
    }
}

/// Bundle of all three parameter sets, for the one-shot `full_report` entry
/// point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineParams {
    #[serde(default)]
    pub indicators: IndicatorParams,
    #[serde(default)]
    pub thresholds: SignalThresholds,
    #[serde(default)]
    pub analysis: AnalysisParams,
}
