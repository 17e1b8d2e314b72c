use serde::{Deserialize, Serialize};

pub const GIBIBYTE: u64 = 1 << 30;
const NON_BREAKING_SPACE: &str = "\u{a0}";
const MAX_EXPONENT: usize = 8;
/// Upper bound on decimals; larger requests are clamped.
pub const MAX_ROUND: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standard {
    Iec,
    Jedec,
    Si,
}

impl Standard {
    fn symbols(self, bits: bool) -> &'static [&'static str; 9] {
        match (self, bits) {
            (Standard::Iec, false) => &["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"],
            (Standard::Iec, true) => &[
                "bit", "Kibit", "Mibit", "Gibit", "Tibit", "Pibit", "Eibit", "Zibit", "Yibit",
            ],
            (Standard::Jedec, false) => &["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"],
            (Standard::Jedec, true) => &[
                "bit", "Kbit", "Mbit", "Gbit", "Tbit", "Pbit", "Ebit", "Zbit", "Ybit",
            ],
            (Standard::Si, false) => &["B", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"],
            (Standard::Si, true) => &[
                "bit", "kbit", "Mbit", "Gbit", "Tbit", "Pbit", "Ebit", "Zbit", "Ybit",
            ],
        }
    }
}

/// Caller-supplied overrides; every field set here wins over the computed
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOptions {
    pub spacer: Option<String>,
    pub round: Option<u32>,
    pub standard: Option<Standard>,
    pub base: Option<u32>,
    pub bits: Option<bool>,
    pub pad: Option<bool>,
}

/// Fully resolved formatting settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeFormat {
    pub spacer: String,
    pub round: u32,
    pub standard: Standard,
    /// 2 selects 1024-based units, anything above 2 selects 1000-based ones.
    pub base: u32,
    pub bits: bool,
    /// Keep trailing zeros of the rounded value.
    pub pad: bool,
}

impl SizeFormat {
    /// Binary IEC units, one decimal from 1 GiB upwards.
    pub fn defaults_for(bytes: u64) -> Self {
        Self {
            spacer: NON_BREAKING_SPACE.to_string(),
            round: if bytes >= GIBIBYTE { 1 } else { 0 },
            standard: Standard::Iec,
            base: 2,
            bits: false,
            pad: true,
        }
    }

    pub fn merge(self, overlay: &SizeOptions) -> Self {
        Self {
            spacer: overlay.spacer.clone().unwrap_or(self.spacer),
            round: overlay.round.unwrap_or(self.round).min(MAX_ROUND),
            standard: overlay.standard.unwrap_or(self.standard),
            base: overlay.base.unwrap_or(self.base),
            bits: overlay.bits.unwrap_or(self.bits),
            pad: overlay.pad.unwrap_or(self.pad),
        }
    }

    pub fn format(&self, bytes: u64) -> String {
        let ceil: u128 = if self.base > 2 { 1000 } else { 1024 };

        let mut exponent = 0;
        let mut threshold = ceil;
        while exponent < MAX_EXPONENT && u128::from(bytes) >= threshold {
            exponent += 1;
            threshold *= ceil;
        }

        let ceil = ceil as f64;
        let mut value = bytes as f64 / ceil.powi(exponent as i32);

        if self.bits {
            value *= 8.0;
            if value >= ceil && exponent < MAX_EXPONENT {
                value /= ceil;
                exponent += 1;
            }
        }

        let mut decimals = self.decimals_at(exponent);
        let mut rounded = round_to(value, decimals);

        if rounded >= ceil && exponent < MAX_EXPONENT {
            rounded = 1.0;
            exponent += 1;
            decimals = self.decimals_at(exponent);
        }

        let mut number = format!("{:.*}", decimals as usize, rounded);
        if !self.pad && number.contains('.') {
            number = number.trim_end_matches('0').trim_end_matches('.').to_string();
        }

        format!(
            "{}{}{}",
            number,
            self.spacer,
            self.standard.symbols(self.bits)[exponent]
        )
    }

    // whole bytes and bits never carry decimals
    fn decimals_at(&self, exponent: usize) -> u32 {
        if exponent > 0 {
            self.round
        } else {
            0
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Formats a byte count for display, `"N/A"` when the size is unknown.
pub fn human_size(size: Option<u64>, opts: &SizeOptions) -> String {
    let Some(bytes) = size else {
        return "N/A".to_string();
    };

    SizeFormat::defaults_for(bytes).merge(opts).format(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nbsp(s: &str) -> String {
        s.replace(' ', NON_BREAKING_SPACE)
    }

    #[test]
    fn unknown_size_is_not_available() {
        assert_eq!(human_size(None, &SizeOptions::default()), "N/A");
    }

    #[test]
    fn zero_is_formatted() {
        assert_eq!(human_size(Some(0), &SizeOptions::default()), nbsp("0 B"));
    }

    #[test]
    fn binary_units_without_decimals_below_a_gibibyte() {
        let opts = SizeOptions::default();
        assert_eq!(human_size(Some(512), &opts), nbsp("512 B"));
        assert_eq!(human_size(Some(1024), &opts), nbsp("1 KiB"));
        assert_eq!(human_size(Some(1536), &opts), nbsp("2 KiB"));
        assert_eq!(human_size(Some(5 * 1024 * 1024), &opts), nbsp("5 MiB"));
    }

    #[test]
    fn one_decimal_from_a_gibibyte() {
        let opts = SizeOptions::default();
        assert_eq!(human_size(Some(GIBIBYTE), &opts), nbsp("1.0 GiB"));
        assert_eq!(human_size(Some(GIBIBYTE * 3 / 2), &opts), nbsp("1.5 GiB"));
        assert_eq!(human_size(Some(GIBIBYTE * 1024), &opts), nbsp("1.0 TiB"));
    }

    #[test]
    fn just_below_a_gibibyte_has_no_decimals() {
        let out = human_size(Some(GIBIBYTE - 1), &SizeOptions::default());
        assert!(!out.contains('.'), "unexpected decimals in {out}");
        assert_eq!(out, nbsp("1 GiB"));
    }

    #[test]
    fn overlay_wins_field_by_field() {
        let opts = SizeOptions {
            spacer: Some(" ".to_string()),
            round: Some(2),
            standard: Some(Standard::Jedec),
            ..Default::default()
        };
        assert_eq!(human_size(Some(1536), &opts), "1.50 KB");

        let opts = SizeOptions {
            spacer: Some(String::new()),
            pad: Some(false),
            round: Some(2),
            ..Default::default()
        };
        assert_eq!(human_size(Some(GIBIBYTE), &opts), "1GiB");
    }

    #[test]
    fn huge_round_is_clamped() {
        for round in [21, 309, 70_000, 3_000_000_000] {
            let opts = SizeOptions {
                spacer: Some(" ".to_string()),
                round: Some(round),
                ..Default::default()
            };
            assert_eq!(human_size(Some(2048), &opts), "2.00000000000000000000 KiB");
        }
    }

    #[test]
    fn decimal_base_and_bits() {
        let opts = SizeOptions {
            spacer: Some(" ".to_string()),
            base: Some(10),
            standard: Some(Standard::Si),
            ..Default::default()
        };
        assert_eq!(human_size(Some(1500), &opts), "2 kB");

        let opts = SizeOptions {
            spacer: Some(" ".to_string()),
            bits: Some(true),
            ..Default::default()
        };
        assert_eq!(human_size(Some(100), &opts), "800 bit");
        assert_eq!(human_size(Some(128), &opts), "1 Kibit");
    }
}
