use super::{PhonemeClass, Row, row};

pub(super) static TABLE: &[Row] = &[
    row("AE", 100.0, [660.0, 1720.0, 2410.0], 120.0, true, 0.8),
    row("AA", 100.0, [730.0, 1090.0, 2440.0], 120.0, true, 0.8),
    row("AH", 100.0, [640.0, 1190.0, 2390.0], 100.0, true, 0.7),
    row("AO", 100.0, [570.0, 840.0, 2410.0], 120.0, true, 0.8),
    row("AW", 100.0, [730.0, 1090.0, 2440.0], 150.0, true, 0.8),
    row("AY", 100.0, [730.0, 1090.0, 2440.0], 150.0, true, 0.8),
    row("EH", 100.0, [530.0, 1840.0, 2480.0], 100.0, true, 0.7),
    row("ER", 100.0, [490.0, 1350.0, 1690.0], 120.0, true, 0.7),
    row("EY", 100.0, [530.0, 1840.0, 2480.0], 150.0, true, 0.8),
    row("IH", 120.0, [390.0, 1990.0, 2550.0], 80.0, true, 0.6),
    row("IY", 120.0, [270.0, 2290.0, 3010.0], 120.0, true, 0.8),
    row("OW", 100.0, [570.0, 840.0, 2410.0], 150.0, true, 0.8),
    row("OY", 100.0, [570.0, 840.0, 2410.0], 150.0, true, 0.8),
    row("UH", 100.0, [440.0, 1020.0, 2240.0], 80.0, true, 0.6),
    row("UW", 100.0, [300.0, 870.0, 2240.0], 120.0, true, 0.8),
    row("B", 80.0, [300.0, 870.0, 2240.0], 60.0, true, 0.5),
    row("CH", 3000.0, [200.0, 1600.0, 2600.0], 100.0, false, 0.4),
    row("D", 150.0, [300.0, 1700.0, 2600.0], 60.0, true, 0.5),
    row("DH", 200.0, [300.0, 1400.0, 2600.0], 80.0, true, 0.3),
    row("F", 6000.0, [1400.0, 2300.0, 2900.0], 100.0, false, 0.3),
    row("G", 120.0, [300.0, 1500.0, 2500.0], 60.0, true, 0.5),
    row("HH", 2000.0, [500.0, 1500.0, 2500.0], 80.0, false, 0.2),
    row("JH", 150.0, [300.0, 1600.0, 2600.0], 100.0, true, 0.5),
    row("K", 2500.0, [300.0, 1500.0, 2500.0], 80.0, false, 0.4),
    row("L", 150.0, [360.0, 750.0, 2400.0], 100.0, true, 0.6),
    row("M", 120.0, [280.0, 900.0, 2200.0], 100.0, true, 0.6),
    row("N", 150.0, [280.0, 1700.0, 2600.0], 80.0, true, 0.6),
    row("NG", 120.0, [280.0, 1300.0, 2200.0], 100.0, true, 0.6),
    row("P", 2000.0, [300.0, 870.0, 2240.0], 80.0, false, 0.4),
    row("R", 120.0, [490.0, 1350.0, 1690.0], 100.0, true, 0.6),
    row("S", 7000.0, [1400.0, 2300.0, 2900.0], 100.0, false, 0.3),
    row("SH", 4000.0, [1800.0, 2300.0, 2800.0], 100.0, false, 0.3),
    row("T", 3000.0, [300.0, 1700.0, 2600.0], 60.0, false, 0.4),
    row("TH", 6000.0, [1400.0, 2300.0, 2900.0], 100.0, false, 0.3),
    row("V", 150.0, [1400.0, 2300.0, 2900.0], 80.0, true, 0.4),
    row("W", 100.0, [300.0, 610.0, 2200.0], 100.0, true, 0.6),
    row("Y", 120.0, [270.0, 2290.0, 3010.0], 80.0, true, 0.6),
    row("Z", 150.0, [1400.0, 2300.0, 2900.0], 100.0, true, 0.4),
    row("ZH", 150.0, [1800.0, 2300.0, 2800.0], 100.0, true, 0.4),
];

pub(super) fn class_of(symbol: &str) -> PhonemeClass {
    match symbol {
        "AA" | "AE" | "AH" | "AO" | "AW" | "AY" | "EH" | "ER" | "EY" | "IH" | "IY" | "OW" | "OY"
        | "UH" | "UW" => PhonemeClass::Vowel,
        "F" | "V" | "TH" | "DH" | "S" | "Z" | "SH" | "ZH" | "HH" => PhonemeClass::Fricative,
        "P" | "B" | "T" | "D" | "K" | "G" => PhonemeClass::Stop,
        "CH" | "JH" => PhonemeClass::Affricate,
        "M" | "N" | "NG" => PhonemeClass::Nasal,
        "L" | "R" => PhonemeClass::Liquid,
        "W" | "Y" => PhonemeClass::Glide,
        _ => PhonemeClass::Unknown,
    }
}

/// Pitch and formant ratios that place a vowel on the front/back, high/low chart.
pub(super) fn vowel_adjustment(symbol: &str) -> Option<(f64, f64)> {
    Some(match symbol {
        "IY" => (1.15, 1.1),
        "IH" => (1.08, 1.05),
        "EH" => (1.05, 1.0),
        "AE" => (1.02, 0.95),
        "AA" => (0.85, 0.9),
        "AO" => (0.9, 0.92),
        "UH" => (0.8, 0.85),
        "UW" => (0.75, 0.8),
        "ER" => (0.95, 0.88),
        "AH" => (0.98, 0.95),
        _ => return None,
    })
}

pub(super) fn is_sibilant(symbol: &str) -> bool {
    matches!(symbol, "S" | "Z")
}
