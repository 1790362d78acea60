//! Heuristic technical signals and recommendation rules
//!
//! Both entry points are pure: the same inputs always give the same output,
//! and nothing is cached between calls.

use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction a signal points in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalCategory {
    Bullish,
    Bearish,
    Neutral,
}

/// A tagged qualitative signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub category: SignalCategory,
    pub text: String,
}

impl Signal {
    fn new(category: SignalCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }

    /// First three words of the text, used as a one-line setup summary
    pub fn headline(&self) -> String {
        self.text.split(' ').take(3).collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Suggested action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "WEAK SELL")]
    WeakSell,
    #[serde(rename = "SELL")]
    Sell,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::StrongBuy => "STRONG BUY",
            Action::Buy => "BUY",
            Action::Hold => "HOLD",
            Action::WeakSell => "WEAK SELL",
            Action::Sell => "SELL",
        })
    }
}

/// Confidence in the action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
        })
    }
}

/// Risk attached to the action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
        })
    }
}

/// Three-field recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    pub confidence: Confidence,
    pub risk: RiskLevel,
}

impl Recommendation {
    const fn new(action: Action, confidence: Confidence, risk: RiskLevel) -> Self {
        Self {
            action,
            confidence,
            risk,
        }
    }
}

fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StockError::InvalidInput(format!(
            "{name} must be a finite number, got {value}"
        )))
    }
}

/// Derive trend and level signals from price and two moving averages
///
/// Returns an empty set when either average is absent or zero, or when the
/// price is zero. Negative values are evaluated like any other. Trend buckets are checked in order with strict comparisons,
/// so ties fall through to "mixed". At most one level signal follows.
pub fn technical_signals(price: f64, dma50: Option<f64>, dma200: Option<f64>) -> Result<Vec<Signal>> {
    ensure_finite("price", price)?;
    if let Some(v) = dma50 {
        ensure_finite("dma50", v)?;
    }
    if let Some(v) = dma200 {
        ensure_finite("dma200", v)?;
    }

    let (Some(dma50), Some(dma200)) = (
        dma50.filter(|v| *v != 0.0),
        dma200.filter(|v| *v != 0.0),
    ) else {
        return Ok(Vec::new());
    };
    if price == 0.0 {
        return Ok(Vec::new());
    }

    let mut signals = Vec::with_capacity(3);

    if price > dma50 && price > dma200 && dma50 > dma200 {
        signals.push(Signal::new(
            SignalCategory::Bullish,
            "🟢 Strong Bullish - Price above both moving averages",
        ));
        signals.push(Signal::new(
            SignalCategory::Bullish,
            "📈 Golden Cross Formation - 50 DMA above 200 DMA",
        ));
    } else if price > dma50 && price > dma200 {
        signals.push(Signal::new(
            SignalCategory::Neutral,
            "🟡 Cautiously Bullish - Price above moving averages",
        ));
    } else if price < dma50 && price < dma200 && dma50 < dma200 {
        signals.push(Signal::new(
            SignalCategory::Bearish,
            "🔴 Strong Bearish - Price below both moving averages",
        ));
        signals.push(Signal::new(
            SignalCategory::Bearish,
            "📉 Death Cross Formation - 50 DMA below 200 DMA",
        ));
    } else {
        signals.push(Signal::new(
            SignalCategory::Neutral,
            "🟡 Mixed Signals - Consolidation phase",
        ));
    }

    let resistance = dma50.max(dma200);
    let support = dma50.min(dma200);

    if price > resistance {
        signals.push(Signal::new(
            SignalCategory::Bullish,
            format!("🚀 Above key resistance level: ₹{resistance:.2}"),
        ));
    } else if price < support {
        signals.push(Signal::new(
            SignalCategory::Bearish,
            format!("⚠️ Below key support level: ₹{support:.2}"),
        ));
    }

    Ok(signals)
}

/// Map percent change and signal balance to a recommendation
///
/// Signals are counted by category tag. Rules are checked in order and the
/// first match wins; everything else is HOLD.
pub fn recommend(percent_change: f64, signals: &[Signal]) -> Result<Recommendation> {
    ensure_finite("percent change", percent_change)?;

    let bullish = signals
        .iter()
        .filter(|s| s.category == SignalCategory::Bullish)
        .count();
    let bearish = signals
        .iter()
        .filter(|s| s.category == SignalCategory::Bearish)
        .count();

    let rec = if percent_change > 15.0 && bullish > bearish {
        Recommendation::new(Action::StrongBuy, Confidence::High, RiskLevel::Moderate)
    } else if percent_change > 5.0 && bullish > 0 {
        Recommendation::new(Action::Buy, Confidence::Medium, RiskLevel::Moderate)
    } else if percent_change < -15.0 && bearish > bullish {
        Recommendation::new(Action::Sell, Confidence::High, RiskLevel::High)
    } else if percent_change < -5.0 && bearish > 0 {
        Recommendation::new(Action::WeakSell, Confidence::Medium, RiskLevel::High)
    } else {
        Recommendation::new(Action::Hold, Confidence::Medium, RiskLevel::Moderate)
    };

    Ok(rec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(signals: &[Signal]) -> Vec<SignalCategory> {
        signals.iter().map(|s| s.category).collect()
    }

    #[test]
    fn test_strong_bullish_setup() {
        let signals = technical_signals(110.0, Some(105.0), Some(100.0)).unwrap();
        assert_eq!(signals.len(), 3);
        assert!(signals[0].text.contains("Strong Bullish"));
        assert!(signals[1].text.contains("Golden Cross"));
        assert_eq!(signals[2].text, "🚀 Above key resistance level: ₹105.00");
        assert!(
            categories(&signals)
                .iter()
                .all(|c| *c == SignalCategory::Bullish)
        );

        let rec = recommend(20.0, &signals).unwrap();
        assert_eq!(
            rec,
            Recommendation::new(Action::StrongBuy, Confidence::High, RiskLevel::Moderate)
        );
    }

    #[test]
    fn test_strong_bearish_setup() {
        let signals = technical_signals(90.0, Some(95.0), Some(100.0)).unwrap();
        assert_eq!(
            categories(&signals),
            vec![
                SignalCategory::Bearish,
                SignalCategory::Bearish,
                SignalCategory::Bearish
            ]
        );
        assert_eq!(signals[2].text, "⚠️ Below key support level: ₹95.00");

        let rec = recommend(-20.0, &signals).unwrap();
        assert_eq!(rec.action, Action::Sell);
        assert_eq!(rec.confidence, Confidence::High);
        assert_eq!(rec.risk, RiskLevel::High);
    }

    #[test]
    fn test_equal_averages_are_cautiously_bullish() {
        let signals = technical_signals(110.0, Some(100.0), Some(100.0)).unwrap();
        assert!(signals[0].text.contains("Cautiously Bullish"));
        assert_eq!(signals[0].category, SignalCategory::Neutral);
        assert_eq!(signals[1].category, SignalCategory::Bullish);
    }

    #[test]
    fn test_ties_fall_through_to_mixed() {
        let signals = technical_signals(100.0, Some(100.0), Some(90.0)).unwrap();
        assert_eq!(signals.len(), 1);
        assert!(signals[0].text.contains("Mixed Signals"));
        assert_eq!(signals[0].category, SignalCategory::Neutral);
    }

    #[test]
    fn test_missing_or_zero_average_gives_empty_set() {
        assert!(technical_signals(100.0, None, Some(90.0)).unwrap().is_empty());
        assert!(technical_signals(100.0, Some(0.0), Some(90.0)).unwrap().is_empty());
        assert!(technical_signals(100.0, Some(95.0), Some(-0.0)).unwrap().is_empty());
        assert!(technical_signals(0.0, Some(95.0), Some(90.0)).unwrap().is_empty());
    }

    #[test]
    fn test_negative_averages_are_evaluated() {
        let signals = technical_signals(50.0, Some(-10.0), Some(-20.0)).unwrap();
        let texts: Vec<&str> = signals.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(signals.len(), 3);
        assert!(texts[0].contains("Strong Bullish"));
        assert!(texts[1].contains("Golden Cross"));
        assert_eq!(texts[2], "🚀 Above key resistance level: ₹-10.00");
    }

    #[test]
    fn test_negative_price_is_evaluated() {
        let signals = technical_signals(-5.0, Some(95.0), Some(100.0)).unwrap();
        assert_eq!(signals.len(), 3);
        assert!(signals[0].text.contains("Strong Bearish"));
        assert!(signals[1].text.contains("Death Cross"));
        assert!(signals[2].text.contains("Below key support"));
        assert!(signals.iter().all(|s| s.category == SignalCategory::Bearish));
    }

    #[test]
    fn test_non_finite_input_rejected() {
        assert!(matches!(
            technical_signals(f64::NAN, Some(1.0), Some(1.0)),
            Err(StockError::InvalidInput(_))
        ));
        assert!(matches!(
            technical_signals(1.0, Some(f64::INFINITY), Some(1.0)),
            Err(StockError::InvalidInput(_))
        ));
        assert!(matches!(
            recommend(f64::NAN, &[]),
            Err(StockError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_hold_when_no_signals() {
        for pct in [-50.0, -10.0, 0.0, 10.0, 50.0] {
            assert_eq!(recommend(pct, &[]).unwrap().action, Action::Hold);
        }
    }

    #[test]
    fn test_threshold_boundaries_are_strict() {
        let bull = technical_signals(110.0, Some(105.0), Some(100.0)).unwrap();
        let bear = technical_signals(90.0, Some(95.0), Some(100.0)).unwrap();

        assert_eq!(recommend(15.0, &bull).unwrap().action, Action::Buy);
        assert_eq!(recommend(15.01, &bull).unwrap().action, Action::StrongBuy);
        assert_eq!(recommend(5.0, &bull).unwrap().action, Action::Hold);
        assert_eq!(recommend(-15.0, &bear).unwrap().action, Action::WeakSell);
        assert_eq!(recommend(-15.01, &bear).unwrap().action, Action::Sell);
        assert_eq!(recommend(-5.0, &bear).unwrap().action, Action::Hold);
    }

    #[test]
    fn test_neutral_signals_do_not_count() {
        let neutral = technical_signals(100.0, Some(100.0), Some(90.0)).unwrap();
        assert_eq!(recommend(30.0, &neutral).unwrap().action, Action::Hold);
    }

    #[test]
    fn test_idempotent() {
        let a = technical_signals(110.0, Some(105.0), Some(100.0)).unwrap();
        let b = technical_signals(110.0, Some(105.0), Some(100.0)).unwrap();
        assert_eq!(a, b);
        assert_eq!(recommend(7.0, &a).unwrap(), recommend(7.0, &b).unwrap());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Action::WeakSell.to_string(), "WEAK SELL");
        assert_eq!(Confidence::Medium.to_string(), "MEDIUM");
        assert_eq!(RiskLevel::Moderate.to_string(), "MODERATE");
        let signal = Signal::new(SignalCategory::Neutral, "🟡 Mixed Signals - Consolidation phase");
        assert_eq!(signal.headline(), "🟡 Mixed Signals");
    }
}
