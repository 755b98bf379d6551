//! Category lexicon: keyword tables driving classification and matching.
//!
//! Everything here is data, not logic. New categories or trigger terms are
//! additive table changes. Terms cover English plus transliterated
//! Hindi/Hinglish variants and a few common misspellings, all lowercase.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Closed set of goods/service domains a message can be filed under.
///
/// There is deliberately no `Unknown` variant: a message without a
/// recognizable category is not actionable and never reaches storage or
/// matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Property,
    Furniture,
    MaidCook,
    Plumber,
    Electrician,
    Carpenter,
    Driver,
    AcRepair,
    Tutor,
    PackersMovers,
    Vehicle,
    PestControl,
    Painter,
    SecurityGuard,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Property => "property",
            Category::Furniture => "furniture",
            Category::MaidCook => "maid/cook",
            Category::Plumber => "plumber",
            Category::Electrician => "electrician",
            Category::Carpenter => "carpenter",
            Category::Driver => "driver",
            Category::AcRepair => "AC repair",
            Category::Tutor => "tutor",
            Category::PackersMovers => "packers & movers",
            Category::Vehicle => "vehicle",
            Category::PestControl => "pest control",
            Category::Painter => "painter",
            Category::SecurityGuard => "security guard",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Property => "\u{1F3E0}",
            Category::Furniture => "\u{1FA91}",
            Category::MaidCook => "\u{1F9F9}",
            Category::Plumber => "\u{1F527}",
            Category::Electrician => "\u{1F4A1}",
            Category::Carpenter => "\u{1FA9A}",
            Category::Driver => "\u{1F697}",
            Category::AcRepair => "\u{2744}\u{FE0F}",
            Category::Tutor => "\u{1F4DA}",
            Category::PackersMovers => "\u{1F4E6}",
            Category::Vehicle => "\u{1F699}",
            Category::PestControl => "\u{1FAB3}",
            Category::Painter => "\u{1F3A8}",
            Category::SecurityGuard => "\u{1F46E}",
        }
    }
}

struct CategoryEntry {
    category: Category,
    triggers: &'static [&'static str],
    subjects: Vec<Regex>,
}

/// Immutable keyword tables, built once at process start and passed into the
/// classifier explicitly.
pub struct Lexicon {
    categories: Vec<CategoryEntry>,
    listing_markers: &'static [&'static str],
    query_markers: &'static [&'static str],
    ignore: Vec<Regex>,
}

/// Terms indicating someone is offering something.
const LISTING_MARKERS: &[&str] = &[
    // English
    "selling",
    "sell my",
    "to sell",
    "for sale",
    "on sale",
    "for rent",
    "on rent",
    "available",
    "offering",
    "i have",
    "we have",
    "for hire",
    // Typos
    "seling",
    "sellin",
    "availble",
    "avalable",
    "avialable",
    "availabel",
    // Hinglish
    "bechna",
    "bech raha",
    "bech rahi",
    "bechana",
    "milega",
    "milegi",
    "mil jayega",
    "mil jayegi",
    "de rahe",
    "de rahi",
    "kiraye par",
    "kiraye pe",
    "rent pe",
    "khali hai",
    "mere paas",
    "hamare paas",
];

/// Terms indicating someone is seeking something.
const QUERY_MARKERS: &[&str] = &[
    // English
    "looking for",
    "need",
    "needed",
    "require",
    "required",
    "want",
    "wanted",
    "searching",
    "anyone",
    "any one",
    "anybody",
    "who has",
    "please share",
    "pls share",
    "can someone",
    "can anyone",
    "recommend",
    "suggest",
    // Typos
    "lokking for",
    "loking for",
    "nedd",
    "requried",
    "requred",
    "serching",
    // Hinglish
    "chahiye",
    "chaiye",
    "chahye",
    "chaheye",
    "cahiye",
    "koi hai",
    "kisi ko pata",
    "kisi ke paas",
    "zarurat",
    "jarurat",
    "mangta",
    "batao",
    "bhejo",
    "lena hai",
    "leni hai",
];

/// Greetings, acknowledgements, bare links/numbers: never actionable.
const IGNORE_PATTERNS: &[&str] = &[
    r"^good\s*(morning|evening|night|afternoon)",
    r"^gm\b",
    r"^gn\b",
    r"^(hi|hello|hey|hii|helloo)\b",
    r"^(thanks|thank you|thanku|thnx|ty|thx)",
    r"^(ok|okay|k|done|noted|okk)\b",
    r"^(yes|no|ya|nahi|haan|han|nope|yep|yup)\b",
    r"^(happy|wish|wishing).*(birthday|anniversary|diwali|holi|eid|christmas)",
    r"^(congratulations|congrats)",
    r"^\+?\d+$",
    r"^https?://",
    r"^@\w+$",
    r"^(ji|jee|hmm|hmmm|accha|achha|sahi|theek|thik)\b",
];

impl Lexicon {
    pub fn new() -> Self {
        let compile = |patterns: &[&str]| -> Vec<Regex> {
            patterns
                .iter()
                .map(|p| Regex::new(p).expect("valid lexicon regex"))
                .collect()
        };

        // Declaration order is the tie-break when two categories' triggers
        // appear at the same earliest position.
        let categories = vec![
            CategoryEntry {
                category: Category::Property,
                triggers: &[
                    "flat", "bhk", "rk", "pg", "apartment", "appartment", "penthouse", "duplex",
                    "property", "makan", "ghar", "kamra", "flaat", "flate",
                ],
                subjects: compile(&[r"\d\s*(?:bhk|rk|bed)", r"studio", r"penthouse", r"duplex"]),
            },
            CategoryEntry {
                category: Category::Furniture,
                triggers: &[
                    "sofa", "sofaa", "table", "tabel", "bed", "mattress", "gadda", "fridge",
                    "freidge", "frige", "refrigerator", "washing machine", "almirah", "almari",
                    "almira", "wardrobe", "cupboard", "kursi", "dining set", "furniture",
                    "furnture", "television",
                ],
                subjects: compile(&[
                    r"sofa|table|bed|mattress|gadda|fridge|refrigerator|washing machine",
                    r"wardrobe|almirah|almari|cupboard|kursi|dining|television|tv",
                ]),
            },
            CategoryEntry {
                category: Category::MaidCook,
                triggers: &[
                    "maid", "maide", "miad", "cook", "coock", "nanny", "babysitter", "housekeeper",
                    "bai", "kaamwali", "kaam wali", "kamwali", "kaamvali", "aaya",
                    "jhaadu pochha", "house help", "domestic help",
                ],
                subjects: compile(&[
                    r"maid|cook|nanny|babysitter|housekeeper|bai|kaamwali|kaam wali|aaya",
                    r"part time|full time",
                ]),
            },
            CategoryEntry {
                category: Category::Plumber,
                triggers: &[
                    "plumber", "plumer", "plumbar", "plomber", "plumbing", "tap leaking",
                    "pipe leaking", "tap leak", "pipe leak", "drainage", "geyser",
                    "nal kharab", "paani tapak",
                ],
                subjects: compile(&[r"tap|pipe|toilet|bathroom|drainage|leak|geyser|tank|nal"]),
            },
            CategoryEntry {
                category: Category::Electrician,
                triggers: &[
                    "electrician", "electritian", "electrican", "electician", "wiring",
                    "mcb", "short circuit", "fan not working", "light not working",
                    "bijli", "bijlee", "inverter kharab", "fan kharab", "light kharab",
                ],
                subjects: compile(&[r"fan|light|switch|wiring|mcb|inverter|socket|plug|fuse"]),
            },
            CategoryEntry {
                category: Category::Carpenter,
                triggers: &[
                    "carpenter", "carpanter", "carpentar", "carpnter", "carpentry", "woodwork",
                    "wood work", "badhai", "mistri", "mistree", "darwaza kharab", "lakdi ka kaam",
                ],
                subjects: compile(&[r"door|cabinet|wardrobe|furniture|drawer|cupboard|darwaza"]),
            },
            CategoryEntry {
                category: Category::Driver,
                triggers: &["driver", "drivar", "drivr", "diver available", "gaadi chalane"],
                subjects: compile(&[r"(?:part time|full time|personal)\s+driver", r"driver"]),
            },
            CategoryEntry {
                category: Category::AcRepair,
                triggers: &[
                    "ac repair", "ac service", "ac servise", "ac not cooling", "ac not working",
                    "ac gas", "ac technician", "ac mechanic", "ac kharab", "ac wala",
                    "ac installation", "fridge repair", "fridge not cooling",
                    "washing machine repair", "geyser repair", "microwave repair",
                ],
                subjects: compile(&[r"ac|air conditioner|fridge|washing machine|microwave|geyser"]),
            },
            CategoryEntry {
                category: Category::Tutor,
                triggers: &[
                    "tutor", "tuter", "tuition", "tution", "tushan", "coaching", "home teaching",
                    "padhane wala", "padha sakta",
                ],
                subjects: compile(&[
                    r"class\s*\d+",
                    r"maths|math|science|english|hindi|physics|chemistry",
                ]),
            },
            CategoryEntry {
                category: Category::PackersMovers,
                triggers: &[
                    "packers", "packar", "movers", "shifting", "shipting", "relocation",
                    "saman shift", "ghar shift",
                ],
                subjects: compile(&[r"local|outstation|interstate|shifting"]),
            },
            CategoryEntry {
                category: Category::Vehicle,
                triggers: &[
                    "car", "bike", "bik", "scooter", "scooty", "scooti", "scoty", "activa",
                    "actva", "two wheeler", "gaadi", "gaadhi", "bullet", "splendor", "pulsar",
                ],
                subjects: compile(&[r"car|bike|scooter|scooty|activa|two wheeler|gaadi|bullet"]),
            },
            CategoryEntry {
                category: Category::PestControl,
                triggers: &[
                    "pest control", "pest contol", "termite", "termit", "cockroach", "cockroch",
                    "bed bugs", "kide makode", "machhar problem", "chuhe",
                ],
                subjects: compile(&[r"cockroach|termite|ant|bed bug|mosquito|rat"]),
            },
            CategoryEntry {
                category: Category::Painter,
                triggers: &[
                    "painter", "paintar", "paiter", "painting", "paintng", "wall paint",
                    "rang wala", "rang karna",
                ],
                subjects: compile(&[r"wall|room|house|interior|exterior"]),
            },
            CategoryEntry {
                category: Category::SecurityGuard,
                triggers: &[
                    "security guard", "secrity guard", "gaurd", "watchman", "watchmn",
                    "chowkidar", "night guard", "day guard",
                ],
                subjects: compile(&[r"guard|watchman|chowkidar|night|day"]),
            },
        ];

        Self {
            categories,
            listing_markers: LISTING_MARKERS,
            query_markers: QUERY_MARKERS,
            ignore: compile(IGNORE_PATTERNS),
        }
    }

    /// Earliest category trigger hit in `text` (normalized, lowercase).
    ///
    /// First-mention wins. Equal positions prefer the longer trigger
    /// ("washing machine repair" beats "washing machine"), then table order.
    /// Returns the byte position of the hit alongside the category.
    pub fn lookup(&self, text: &str) -> Option<(Category, usize)> {
        let mut best: Option<(Category, usize, usize)> = None;
        for entry in &self.categories {
            for trigger in entry.triggers {
                let Some(pos) = find_term(text, trigger) else {
                    continue;
                };
                let better = match best {
                    None => true,
                    Some((_, best_pos, best_len)) => {
                        pos < best_pos || (pos == best_pos && trigger.len() > best_len)
                    }
                };
                if better {
                    best = Some((entry.category, pos, trigger.len()));
                }
            }
        }
        best.map(|(cat, pos, _)| (cat, pos))
    }

    pub fn has_listing_marker(&self, text: &str) -> bool {
        self.listing_markers
            .iter()
            .any(|m| find_term(text, m).is_some())
    }

    pub fn has_query_marker(&self, text: &str) -> bool {
        self.query_markers
            .iter()
            .any(|m| find_term(text, m).is_some())
    }

    /// Greeting/noise pre-filter, checked against the raw (trimmed,
    /// lowercased) message before any other work.
    pub fn should_ignore(&self, raw: &str) -> bool {
        let trimmed = raw.trim().to_lowercase();
        if trimmed.chars().count() < 5 {
            return true;
        }
        self.ignore.iter().any(|p| p.is_match(&trimmed))
    }

    /// First subject-pattern match for `category` in the normalized text,
    /// with inner whitespace squeezed out ("2 bhk" -> "2bhk").
    pub fn subject_for(&self, category: Category, text: &str) -> Option<String> {
        let entry = self.categories.iter().find(|e| e.category == category)?;
        for pattern in &entry.subjects {
            if let Some(m) = pattern.find(text) {
                let compact: String = m.as_str().split_whitespace().collect();
                if !compact.is_empty() {
                    return Some(compact);
                }
            }
        }
        None
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// Substring search with letter boundaries on both sides.
///
/// Digits do not break a boundary, so "bhk" matches inside "2bhk" while
/// "ac" does not match inside "package". `term` may contain spaces.
pub(crate) fn find_term(text: &str, term: &str) -> Option<usize> {
    if term.is_empty() {
        return None;
    }
    let bytes = text.as_bytes();
    let mut from = 0usize;
    while let Some(rel) = text[from..].find(term) {
        let start = from + rel;
        let end = start + term.len();
        let left_ok = start == 0 || !bytes[start - 1].is_ascii_alphabetic();
        let right_ok = end == bytes.len() || !bytes[end].is_ascii_alphabetic();
        if left_ok && right_ok {
            return Some(start);
        }
        from = start + 1;
    }
    None
}
