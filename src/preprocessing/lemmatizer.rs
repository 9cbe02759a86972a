//! Rule-based English lemmatization.
//!
//! Maps inflected tokens to their dictionary base form: plural nouns to the
//! singular, regular past/progressive verb forms to the infinitive, plus a
//! table of common irregulars. Unknown shapes are left alone; this is a
//! lemmatizer, not a stemmer, so the output is always a plausible word.

use std::collections::{HashMap, HashSet};

/// Irregular inflections that no suffix rule recovers.
const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("people", "person"),
    ("leaves", "leaf"),
    ("knives", "knife"),
    ("shelves", "shelf"),
    ("went", "go"),
    ("gone", "go"),
    ("bought", "buy"),
    ("brought", "bring"),
    ("thought", "think"),
    ("caught", "catch"),
    ("taught", "teach"),
    ("got", "get"),
    ("gotten", "get"),
    ("made", "make"),
    ("said", "say"),
    ("took", "take"),
    ("taken", "take"),
    ("came", "come"),
    ("gave", "give"),
    ("given", "give"),
    ("found", "find"),
    ("told", "tell"),
    ("felt", "feel"),
    ("kept", "keep"),
    ("left", "leave"),
    ("paid", "pay"),
    ("sent", "send"),
    ("spent", "spend"),
    ("sold", "sell"),
    ("broke", "break"),
    ("wrote", "write"),
    ("written", "write"),
    ("ran", "run"),
    ("sat", "sit"),
    ("stood", "stand"),
    ("held", "hold"),
    ("wore", "wear"),
    ("worn", "wear"),
    ("died", "die"),
    ("using", "use"),
    // -ie nouns whose plural is structurally ambiguous with -y plurals
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("rookies", "rookie"),
    ("hoodies", "hoodie"),
    ("smoothies", "smoothie"),
    ("selfies", "selfie"),
    ("zombies", "zombie"),
    ("calories", "calorie"),
];

/// Words a suffix rule would mangle; kept verbatim.
const INVARIANT: &[&str] = &[
    "news", "series", "species", "lens", "plus", "thus", "always", "perhaps",
    "besides", "sometimes", "whereas", "morning", "evening", "something",
    "anything", "everything", "nothing", "wedding", "building", "clothing",
    "ceiling", "string", "spring",
];

/// Stems that lost a trailing `e` to -ed/-ing stripping.
const RESTORE_E: &[&str] = &[
    "us", "mak", "tak", "com", "giv", "hav", "lov", "hat", "mov", "rat",
    "writ", "chang", "charg", "receiv", "believ", "amaz", "pric", "packag",
    "wast", "shar", "sav", "serv", "stor", "replac", "notic", "decid",
    "arriv", "damag", "tir",
];

/// Rule-based English lemmatizer.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    invariant: HashSet<&'static str>,
    restore_e: HashSet<&'static str>,
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            irregular: IRREGULAR.iter().copied().collect(),
            invariant: INVARIANT.iter().copied().collect(),
            restore_e: RESTORE_E.iter().copied().collect(),
        }
    }

    /// Lemmatize a single token. Idempotent: `lemma(lemma(w)) == lemma(w)`.
    pub fn lemma(&self, word: &str) -> String {
        if word.len() <= 3 {
            return word.to_string();
        }
        if let Some(base) = self.irregular.get(word) {
            return (*base).to_string();
        }
        if self.invariant.contains(word) {
            return word.to_string();
        }

        // Plural endings with a spelling change.
        if let Some(stem) = word.strip_suffix("sses") {
            return format!("{stem}ss");
        }
        if word.len() > 4 {
            if let Some(stem) = word.strip_suffix("ies") {
                return format!("{stem}y");
            }
            if let Some(stem) = word.strip_suffix("ied") {
                return format!("{stem}y");
            }
        }
        for es_suffix in ["xes", "ches", "shes", "zzes"] {
            if let Some(stem) = word.strip_suffix(es_suffix) {
                return format!("{}{}", stem, &es_suffix[..es_suffix.len() - 2]);
            }
        }

        // Progressive and regular past forms.
        if word.len() >= 6 {
            if let Some(stem) = word.strip_suffix("ing") {
                if let Some(base) = self.fix_verb_stem(stem) {
                    return base;
                }
            }
        }
        if word.len() >= 5 && !word.ends_with("eed") {
            if let Some(stem) = word.strip_suffix("ed") {
                if let Some(base) = self.fix_verb_stem(stem) {
                    return base;
                }
            }
        }

        // Plain plural.
        if word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return word[..word.len() - 1].to_string();
        }

        word.to_string()
    }

    /// Repair a stem left over after stripping -ed/-ing, or reject the strip
    /// entirely (`None`) when the remainder is not a credible word.
    fn fix_verb_stem(&self, stem: &str) -> Option<String> {
        if self.restore_e.contains(stem) {
            return Some(format!("{stem}e"));
        }
        if !stem.bytes().any(|b| matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')) {
            return None;
        }
        if stem.len() < 3 {
            return None;
        }
        // Undo consonant doubling (shopped -> shop), leaving real doubles
        // like "sell"/"miss"/"add" alone.
        let bytes = stem.as_bytes();
        let last = bytes[bytes.len() - 1];
        if bytes.len() >= 4
            && last == bytes[bytes.len() - 2]
            && matches!(last, b'b' | b'g' | b'm' | b'n' | b'p' | b'r' | b't')
        {
            return Some(stem[..stem.len() - 1].to_string());
        }
        Some(stem.to_string())
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_nouns() {
        let lem = Lemmatizer::new();
        assert_eq!(lem.lemma("cameras"), "camera");
        assert_eq!(lem.lemma("reviews"), "review");
        assert_eq!(lem.lemma("boxes"), "box");
        assert_eq!(lem.lemma("watches"), "watch");
        assert_eq!(lem.lemma("batteries"), "battery");
        assert_eq!(lem.lemma("glasses"), "glass");
    }

    #[test]
    fn verb_forms() {
        let lem = Lemmatizer::new();
        assert_eq!(lem.lemma("working"), "work");
        assert_eq!(lem.lemma("worked"), "work");
        assert_eq!(lem.lemma("shipped"), "ship");
        assert_eq!(lem.lemma("shopping"), "shop");
        assert_eq!(lem.lemma("charging"), "charge");
        assert_eq!(lem.lemma("loved"), "love");
        assert_eq!(lem.lemma("satisfied"), "satisfy");
        assert_eq!(lem.lemma("tried"), "try");
    }

    #[test]
    fn irregular_forms() {
        let lem = Lemmatizer::new();
        assert_eq!(lem.lemma("bought"), "buy");
        assert_eq!(lem.lemma("broke"), "break");
        assert_eq!(lem.lemma("children"), "child");
        assert_eq!(lem.lemma("movies"), "movie");
    }

    #[test]
    fn protected_words_survive() {
        let lem = Lemmatizer::new();
        assert_eq!(lem.lemma("news"), "news");
        assert_eq!(lem.lemma("always"), "always");
        assert_eq!(lem.lemma("thing"), "thing");
        assert_eq!(lem.lemma("string"), "string");
        assert_eq!(lem.lemma("speed"), "speed");
        assert_eq!(lem.lemma("added"), "add");
        assert_eq!(lem.lemma("selling"), "sell");
        assert_eq!(lem.lemma("missed"), "miss");
    }

    #[test]
    fn short_words_untouched() {
        let lem = Lemmatizer::new();
        assert_eq!(lem.lemma("gas"), "gas");
        assert_eq!(lem.lemma("red"), "red");
        assert_eq!(lem.lemma("its"), "its");
    }

    #[test]
    fn idempotent() {
        let lem = Lemmatizer::new();
        for word in [
            "cameras", "batteries", "working", "shipped", "charging", "bought",
            "movies", "glasses", "news", "thing", "study", "use",
        ] {
            let once = lem.lemma(word);
            assert_eq!(lem.lemma(&once), once, "lemma of {word} not a fixed point");
        }
    }
}
