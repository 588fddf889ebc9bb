//! Hindi word tables and letter rules. Symbols are Devanagari letters; a vowel
//! sign and its independent vowel share one symbol.

/// Devanagari whole-word pronunciations, with the inherent vowel written out.
pub(super) static WORDS: &[(&str, &[&str])] = &[
    ("नमस\u{94D}त\u{947}", &["न", "अ", "म", "अ", "स", "त", "ए"]),
    ("नमस\u{94D}क\u{93E}र", &["न", "अ", "म", "अ", "स", "क", "आ", "र"]),
    ("आप", &["आ", "प"]),
    ("क\u{948}स\u{947}", &["क", "ऐ", "स", "ए"]),
    ("ह\u{948}\u{902}", &["ह", "ऐ", "\u{902}"]),
    ("अच\u{94D}छ\u{93E}", &["अ", "च", "छ", "आ"]),
    ("बह\u{941}त", &["ब", "अ", "ह", "उ", "त"]),
    ("धन\u{94D}यव\u{93E}द", &["ध", "अ", "न", "य", "व", "आ", "द"]),
    ("श\u{941}क\u{94D}र\u{93F}य\u{93E}", &["श", "उ", "क", "र", "इ", "य", "आ"]),
    ("ह\u{93E}\u{901}", &["ह", "आ", "\u{902}"]),
    ("नह\u{940}\u{902}", &["न", "अ", "ह", "ई", "\u{902}"]),
    ("क\u{94D}य\u{93E}", &["क", "य", "आ"]),
    ("कब", &["क", "अ", "ब"]),
    ("कह\u{93E}\u{901}", &["क", "अ", "ह", "आ", "\u{902}"]),
    ("क\u{94D}य\u{94B}\u{902}", &["क", "य", "ओ", "\u{902}"]),
    ("क\u{94C}न", &["क", "औ", "न"]),
    ("क\u{94B}ई", &["क", "ओ", "ई"]),
    ("स\u{941}\u{902}दर", &["स", "उ", "\u{902}", "द", "अ", "र"]),
    ("अच\u{94D}छ\u{940}", &["अ", "च", "छ", "ई"]),
    ("प\u{94D}य\u{93E}र\u{93E}", &["प", "य", "आ", "र", "आ"]),
    ("ख\u{941}श", &["ख", "उ", "श"]),
    ("ख\u{941}श\u{940}", &["ख", "उ", "श", "ई"]),
    ("प\u{94D}र\u{947}म", &["प", "र", "ए", "म"]),
    ("प\u{94D}य\u{93E}र", &["प", "य", "आ", "र"]),
    ("द\u{94B}स\u{94D}त", &["द", "ओ", "स", "त"]),
    ("म\u{93F}त\u{94D}र", &["म", "इ", "त", "र"]),
    ("पर\u{93F}व\u{93E}र", &["प", "अ", "र", "इ", "व", "आ", "र"]),
];

/// Romanised spellings of common words.
pub(super) static ROMAN_WORDS: &[(&str, &[&str])] = &[
    ("namaste", &["न", "अ", "म", "अ", "स", "त", "ए"]),
    ("namaskar", &["न", "अ", "म", "अ", "स", "क", "आ", "र"]),
    ("aap", &["आ", "प"]),
    ("kaise", &["क", "ऐ", "स", "ए"]),
    ("hai", &["ह", "ऐ"]),
    ("hain", &["ह", "ऐ", "\u{902}"]),
    ("accha", &["अ", "च", "छ", "आ"]),
    ("achha", &["अ", "च", "छ", "आ"]),
    ("acha", &["अ", "च", "छ", "आ"]),
    ("bahut", &["ब", "अ", "ह", "उ", "त"]),
    ("dhanyavaad", &["ध", "अ", "न", "य", "व", "आ", "द"]),
    ("dhanyavad", &["ध", "अ", "न", "य", "व", "आ", "द"]),
    ("shukriya", &["श", "उ", "क", "र", "इ", "य", "आ"]),
    ("haan", &["ह", "आ", "\u{902}"]),
    ("nahi", &["न", "अ", "ह", "ई"]),
    ("nahin", &["न", "अ", "ह", "ई", "\u{902}"]),
    ("kya", &["क", "य", "आ"]),
    ("kab", &["क", "अ", "ब"]),
    ("kahan", &["क", "अ", "ह", "आ", "\u{902}"]),
    ("kyon", &["क", "य", "ओ", "\u{902}"]),
    ("kaun", &["क", "औ", "न"]),
    ("koi", &["क", "ओ", "ई"]),
    ("sundar", &["स", "उ", "\u{902}", "द", "अ", "र"]),
    ("pyaar", &["प", "य", "आ", "र"]),
    ("pyar", &["प", "य", "आ", "र"]),
    ("prem", &["प", "र", "ए", "म"]),
    ("dost", &["द", "ओ", "स", "त"]),
    ("mitra", &["म", "इ", "त", "र"]),
    ("parivaar", &["प", "अ", "र", "इ", "व", "आ", "र"]),
    ("khush", &["ख", "उ", "श"]),
    ("khushi", &["ख", "उ", "श", "ई"]),
    ("main", &["म", "ऐ", "\u{902}"]),
    ("mein", &["म", "ए", "\u{902}"]),
    ("aur", &["औ", "र"]),
    ("hum", &["ह", "उ", "म"]),
    ("tum", &["त", "उ", "म"]),
    ("yeh", &["य", "ए"]),
    ("woh", &["व", "ओ"]),
    ("ka", &["क", "आ"]),
    ("ki", &["क", "ई"]),
    ("ke", &["क", "ए"]),
    ("ko", &["क", "ओ"]),
    ("se", &["स", "ए"]),
    ("bhi", &["भ", "ई"]),
    ("toh", &["त", "ओ"]),
    ("ek", &["ए", "क"]),
    ("par", &["प", "अ", "र"]),
    ("ho", &["ह", "ओ"]),
    ("tha", &["थ", "आ"]),
    ("thi", &["थ", "ई"]),
];

/// Letter rules. Virama and a lone nukta have no entry and are skipped.
pub(super) static RULES: &[(&str, &[&str])] = &[
    ("अ", &["अ"]),
    ("आ", &["आ"]),
    ("इ", &["इ"]),
    ("ई", &["ई"]),
    ("उ", &["उ"]),
    ("ऊ", &["ऊ"]),
    ("ऋ", &["ऋ"]),
    ("ए", &["ए"]),
    ("ऐ", &["ऐ"]),
    ("ओ", &["ओ"]),
    ("औ", &["औ"]),
    ("क", &["क"]),
    ("ख", &["ख"]),
    ("ग", &["ग"]),
    ("घ", &["घ"]),
    ("ङ", &["ङ"]),
    ("च", &["च"]),
    ("छ", &["छ"]),
    ("ज", &["ज"]),
    ("झ", &["झ"]),
    ("ञ", &["ञ"]),
    ("ट", &["ट"]),
    ("ठ", &["ठ"]),
    ("ड", &["ड"]),
    ("ढ", &["ढ"]),
    ("ण", &["ण"]),
    ("त", &["त"]),
    ("थ", &["थ"]),
    ("द", &["द"]),
    ("ध", &["ध"]),
    ("न", &["न"]),
    ("प", &["प"]),
    ("फ", &["फ"]),
    ("ब", &["ब"]),
    ("भ", &["भ"]),
    ("म", &["म"]),
    ("य", &["य"]),
    ("र", &["र"]),
    ("ल", &["ल"]),
    ("व", &["व"]),
    ("श", &["श"]),
    ("ष", &["ष"]),
    ("स", &["स"]),
    ("ह", &["ह"]),
    ("\u{93E}", &["आ"]),
    ("\u{93F}", &["इ"]),
    ("\u{940}", &["ई"]),
    ("\u{941}", &["उ"]),
    ("\u{942}", &["ऊ"]),
    ("\u{943}", &["ऋ"]),
    ("\u{947}", &["ए"]),
    ("\u{948}", &["ऐ"]),
    ("\u{94B}", &["ओ"]),
    ("\u{94C}", &["औ"]),
    ("\u{949}", &["ओ"]),
    ("ऑ", &["ओ"]),
    ("\u{902}", &["\u{902}"]),
    ("\u{901}", &["\u{902}"]),
    ("\u{903}", &["\u{903}"]),
    ("क\u{93C}", &["क"]),
    ("\u{958}", &["क"]),
    ("ख\u{93C}", &["ख"]),
    ("\u{959}", &["ख"]),
    ("ग\u{93C}", &["ग"]),
    ("\u{95A}", &["ग"]),
    ("ज\u{93C}", &["ज"]),
    ("\u{95B}", &["ज"]),
    ("ड\u{93C}", &["ड"]),
    ("\u{95C}", &["ड"]),
    ("ढ\u{93C}", &["ढ"]),
    ("\u{95D}", &["ढ"]),
    ("फ\u{93C}", &["फ"]),
    ("\u{95E}", &["फ"]),
    ("य\u{93C}", &["य"]),
    ("\u{95F}", &["य"]),
    ("aa", &["आ"]),
    ("ee", &["ई"]),
    ("ii", &["ई"]),
    ("oo", &["ऊ"]),
    ("uu", &["ऊ"]),
    ("ai", &["ऐ"]),
    ("au", &["औ"]),
    ("kh", &["ख"]),
    ("gh", &["घ"]),
    ("ch", &["च"]),
    ("jh", &["झ"]),
    ("th", &["थ"]),
    ("dh", &["ध"]),
    ("ph", &["फ"]),
    ("bh", &["भ"]),
    ("sh", &["श"]),
    ("ng", &["ङ"]),
    ("a", &["अ"]),
    ("b", &["ब"]),
    ("c", &["क"]),
    ("d", &["द"]),
    ("e", &["ए"]),
    ("f", &["फ"]),
    ("g", &["ग"]),
    ("h", &["ह"]),
    ("i", &["इ"]),
    ("j", &["ज"]),
    ("k", &["क"]),
    ("l", &["ल"]),
    ("m", &["म"]),
    ("n", &["न"]),
    ("o", &["ओ"]),
    ("p", &["प"]),
    ("q", &["क"]),
    ("r", &["र"]),
    ("s", &["स"]),
    ("t", &["त"]),
    ("u", &["उ"]),
    ("v", &["व"]),
    ("w", &["व"]),
    ("y", &["य"]),
    ("z", &["ज"]),
    ("x", &["क", "स"]),
];

/// Romanised closed-class words used to spot Hindi written in Latin script.
pub(super) static CLOSED_CLASS: &[&str] = &[
    "hai",
    "hain",
    "ka",
    "ki",
    "ke",
    "ko",
    "se",
    "mein",
    "main",
    "aur",
    "nahi",
    "nahin",
    "kya",
    "aap",
    "tum",
    "hum",
    "yeh",
    "woh",
    "bhi",
    "toh",
    "ek",
    "par",
    "ho",
    "tha",
    "thi",
];
