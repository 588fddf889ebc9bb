use super::{PhonemeClass, Row, row};

pub(super) static TABLE: &[Row] = &[
    row("अ", 100.0, [640.0, 1190.0, 2390.0], 100.0, true, 0.7),
    row("आ", 100.0, [730.0, 1090.0, 2440.0], 150.0, true, 0.8),
    row("इ", 120.0, [390.0, 1990.0, 2550.0], 100.0, true, 0.7),
    row("ई", 120.0, [270.0, 2290.0, 3010.0], 150.0, true, 0.8),
    row("उ", 100.0, [440.0, 1020.0, 2240.0], 100.0, true, 0.7),
    row("ऊ", 100.0, [300.0, 870.0, 2240.0], 150.0, true, 0.8),
    row("ऋ", 110.0, [490.0, 1350.0, 1690.0], 120.0, true, 0.7),
    row("ए", 110.0, [530.0, 1840.0, 2480.0], 130.0, true, 0.8),
    row("ऐ", 110.0, [610.0, 1900.0, 2500.0], 130.0, true, 0.8),
    row("ओ", 100.0, [570.0, 840.0, 2410.0], 130.0, true, 0.8),
    row("औ", 100.0, [620.0, 900.0, 2450.0], 130.0, true, 0.8),
    row("क", 2500.0, [300.0, 1500.0, 2500.0], 80.0, false, 0.4),
    row("ख", 2500.0, [300.0, 1500.0, 2500.0], 100.0, false, 0.4),
    row("ग", 120.0, [300.0, 1500.0, 2500.0], 70.0, true, 0.5),
    row("घ", 120.0, [300.0, 1500.0, 2500.0], 90.0, true, 0.5),
    row("ङ", 120.0, [280.0, 1300.0, 2200.0], 100.0, true, 0.6),
    row("च", 3000.0, [200.0, 1600.0, 2600.0], 90.0, false, 0.4),
    row("छ", 3000.0, [200.0, 1600.0, 2600.0], 110.0, false, 0.4),
    row("ज", 150.0, [300.0, 1600.0, 2600.0], 80.0, true, 0.5),
    row("झ", 150.0, [300.0, 1600.0, 2600.0], 100.0, true, 0.5),
    row("ञ", 150.0, [280.0, 1700.0, 2600.0], 100.0, true, 0.6),
    row("ट", 3500.0, [300.0, 1700.0, 2600.0], 80.0, false, 0.4),
    row("ठ", 3500.0, [300.0, 1700.0, 2600.0], 100.0, false, 0.4),
    row("ड", 150.0, [300.0, 1700.0, 2600.0], 70.0, true, 0.5),
    row("ढ", 150.0, [300.0, 1700.0, 2600.0], 90.0, true, 0.5),
    row("ण", 150.0, [280.0, 1500.0, 2400.0], 100.0, true, 0.6),
    row("त", 3000.0, [300.0, 1700.0, 2600.0], 70.0, false, 0.4),
    row("थ", 3000.0, [300.0, 1700.0, 2600.0], 90.0, false, 0.4),
    row("द", 150.0, [300.0, 1700.0, 2600.0], 60.0, true, 0.5),
    row("ध", 150.0, [300.0, 1700.0, 2600.0], 80.0, true, 0.5),
    row("न", 150.0, [280.0, 1700.0, 2600.0], 90.0, true, 0.6),
    row("प", 2000.0, [300.0, 870.0, 2240.0], 80.0, false, 0.4),
    row("फ", 2000.0, [300.0, 870.0, 2240.0], 100.0, false, 0.4),
    row("ब", 80.0, [300.0, 870.0, 2240.0], 60.0, true, 0.5),
    row("भ", 80.0, [300.0, 870.0, 2240.0], 80.0, true, 0.5),
    row("म", 120.0, [280.0, 900.0, 2200.0], 100.0, true, 0.6),
    row("य", 120.0, [270.0, 2290.0, 3010.0], 90.0, true, 0.6),
    row("र", 120.0, [490.0, 1350.0, 1690.0], 80.0, true, 0.6),
    row("ल", 150.0, [360.0, 750.0, 2400.0], 90.0, true, 0.6),
    row("व", 120.0, [300.0, 610.0, 2200.0], 90.0, true, 0.6),
    row("श", 4000.0, [1800.0, 2300.0, 2800.0], 100.0, false, 0.3),
    row("ष", 3500.0, [1600.0, 2100.0, 2700.0], 100.0, false, 0.3),
    row("स", 7000.0, [1400.0, 2300.0, 2900.0], 100.0, false, 0.3),
    row("ह", 1500.0, [500.0, 1500.0, 2500.0], 80.0, true, 0.3),
    row("\u{902}", 120.0, [280.0, 1300.0, 2200.0], 50.0, true, 0.4),
    row("\u{903}", 2000.0, [500.0, 1500.0, 2500.0], 60.0, false, 0.2),
];

pub(super) fn class_of(symbol: &str) -> PhonemeClass {
    match symbol {
        "अ" | "आ" | "इ" | "ई" | "उ" | "ऊ" | "ऋ" | "ए" | "ऐ" | "ओ" | "औ" => PhonemeClass::Vowel,
        "क" | "ख" | "ग" | "घ" | "ट" | "ठ" | "ड" | "ढ" | "त" | "थ" | "द" | "ध" | "प" | "फ" | "ब"
        | "भ" => PhonemeClass::Stop,
        "च" | "छ" | "ज" | "झ" => PhonemeClass::Affricate,
        "ङ" | "ञ" | "ण" | "न" | "म" | "\u{902}" => PhonemeClass::Nasal,
        "र" | "ल" => PhonemeClass::Liquid,
        "य" | "व" => PhonemeClass::Glide,
        "श" | "ष" | "स" | "ह" | "\u{903}" => PhonemeClass::Fricative,
        _ => PhonemeClass::Unknown,
    }
}

/// The English vowel whose pitch and formant adjustment a Hindi vowel shares.
pub(super) fn english_vowel(symbol: &str) -> Option<&'static str> {
    Some(match symbol {
        "अ" => "AH",
        "आ" => "AA",
        "इ" => "IH",
        "ई" => "IY",
        "उ" => "UH",
        "ऊ" => "UW",
        "ऋ" => "ER",
        "ए" => "EH",
        "ऐ" => "AE",
        "औ" => "AO",
        _ => return None,
    })
}

pub(super) fn is_sibilant(symbol: &str) -> bool {
    symbol == "स"
}
