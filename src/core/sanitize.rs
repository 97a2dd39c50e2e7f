// src/core/sanitize.rs
//
// Text normalization for scraped lead paragraphs.
// `clean` is total and idempotent: it reapplies its rule set until the text
// stops changing.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `[1]`, `[ 12 ]`, `[a]`, `[note 3]`, `[citation needed]`
static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\s*(?:\d+|[a-z]|(?:note|nb)\s*\d+|[a-z ]*needed)\s*\]").unwrap()
});

/// Any innermost bracket run; kept or dropped by `is_phonetic`.
static BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\[\]]*\]").unwrap());

/// Slash-delimited runs without digits (`/ˈɡiː/`); dropped only if phonetic.
static SLASHED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/[^/\d\n]{1,80}/;?").unwrap());

/// Audio prompts that show up outside brackets on non-English pages.
static BARE_AUDIO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:écouter|uitspraak)\b;?").unwrap());

static MD_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]\([^()\s]*\)").unwrap());

/// HTML comments and tags of the inline/markup elements that leak into
/// lead text. Other `<…>` runs are prose (`x<y and z>w`).
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)<!--[\s\S]*?-->|</?(?:a|abbr|b|bdi|big|br|cite|code|div|em|i|img|link|math|meta|p|q|s|small|span|strong|style|sub|sup|u|wbr)(?:\s+[^<>]*)?/?>",
    )
    .unwrap()
});

static ICON_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ⓘ🔊🔉🔈]").unwrap());

static PAREN_OPEN_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\s+").unwrap());

/// `()`, `( ; )`, `(Dutch: )` once their content has been stripped.
static PAREN_EMPTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((?:\s*\p{L}[\p{L}\p{M} .'-]*:)?[\s;,]*\)").unwrap()
});

/// `(Dutch: ; born …` → `(born …`
static PAREN_LABEL_SEP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*\p{L}[\p{L}\p{M} .'-]*:\s*[;,]\s*").unwrap()
});

static PAREN_LEAD_SEP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\s*[;,]\s*").unwrap());

/// Space left before `,` `;` `)` or a lone sentence-ending `.`; ellipses stay.
static WS_BEFORE_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,;)]|\.(?:\s|$))").unwrap());

static TRAILING_SEMI_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r";\s*$").unwrap());

const IPA_CHARS: &[char] = &[
    'ˈ', 'ˌ', 'ː', 'ˑ', 'ə', 'ɪ', 'ʊ', 'ɛ', 'ɔ', 'æ', 'ʃ', 'ʒ', 'θ', 'ð', 'ŋ', 'ɣ', 'ɐ', 'ɾ',
    'ʁ', 'χ', 'β', 'ɲ', 'ʎ', 'ɑ', 'ɒ', 'ʌ', 'ɜ', 'ɡ', 'ɦ', 'ɫ', 'ɹ', 'ʔ', 'ʏ', 'ɨ', 'ʉ', 'ɯ',
    'ɤ', 'ɕ', 'ʑ', 'ʂ', 'ʐ', 'ʝ', 'ɟ', 'ɖ', 'ʈ', 'ɳ', 'ɭ', 'ɽ', 'ʲ', 'ʷ', '\u{0303}',
];

/// Audio-prompt words, matched as whole words.
static AUDIO_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:listen|pronunciation|pronounced|audio|écouter|prononciation|uitspraak|luister|aussprache|anhören|escuchar|pronunciación|ascolta|ouvir)\b",
    )
    .unwrap()
});

/// Clean a scraped paragraph into a single normalized line.
///
/// Per pass, in order: citation markers, phonetic annotations, markdown links,
/// inline tags/entities, icon symbols, leftover punctuation, whitespace.
pub fn clean(raw: &str) -> String {
    let mut current = raw.to_string();
    // Every rule either shortens the text or leaves it unchanged
    // (whitespace collapse may swap '\n' for ' '), so this converges.
    loop {
        let next = clean_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn clean_pass(s: &str) -> String {
    let s = CITATION_RE.replace_all(s, "");
    let s = strip_phonetic(&s);
    let s = MD_LINK_RE.replace_all(&s, "$1");
    let s = TAG_RE.replace_all(&s, "");
    let s = normalize_entities(&s);
    let s = ICON_RE.replace_all(&s, "");
    let s = tidy_punctuation(&s);
    normalize_ws(&s)
}

fn strip_phonetic(s: &str) -> String {
    let s = BRACKET_RE.replace_all(s, |c: &Captures| keep_unless_phonetic(&c[0]));
    let s = SLASHED_RE.replace_all(&s, |c: &Captures| {
        if c[0].contains(IPA_CHARS) { s!() } else { s!(&c[0]) }
    });
    BARE_AUDIO_RE.replace_all(&s, "").into_owned()
}

/// Brackets emptied by an earlier rule go too.
fn keep_unless_phonetic(bracketed: &str) -> String {
    let inner = &bracketed[1..bracketed.len() - 1];
    if inner.trim().is_empty() || is_phonetic(inner) { s!() } else { s!(bracketed) }
}

/// Stress marks, IPA letters, or an audio prompt word.
pub fn is_phonetic(s: &str) -> bool {
    if s.contains(IPA_CHARS) {
        return true;
    }
    AUDIO_WORD_RE.is_match(s)
}

fn tidy_punctuation(s: &str) -> String {
    let s = PAREN_OPEN_WS_RE.replace_all(s, "(");
    let s = PAREN_EMPTY_RE.replace_all(&s, "");
    let s = PAREN_LABEL_SEP_RE.replace_all(&s, "(");
    let s = PAREN_LEAD_SEP_RE.replace_all(&s, "(");
    let s = WS_BEFORE_PUNCT_RE.replace_all(&s, "$1");
    let s: Cow<str> = TRAILING_SEMI_RE.replace_all(&s, "");
    s.into_owned()
}

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verhofstadt_lead() {
        let raw = "Guy Verhofstadt[1] (Dutch: [ɣistaːf maːrˈtsɛlə]) is a Belgian...";
        assert_eq!(clean(raw), "Guy Verhofstadt is a Belgian...");
    }

    #[test]
    fn keeps_born_after_label_and_audio() {
        let raw = "Charles Michel (French: [ʃaʁl miʃɛl] ⓘ; born 21 December 1975) is a Belgian politician.";
        assert_eq!(clean(raw), "Charles Michel (born 21 December 1975) is a Belgian politician.");
    }

    #[test]
    fn drops_slashed_ipa_and_bare_audio_words() {
        let raw = "Emmanuel Macron (/ɛmanɥɛl makʁɔ̃/; Écouter; born 21 December 1977) is a French politician.";
        assert_eq!(clean(raw), "Emmanuel Macron (born 21 December 1977) is a French politician.");
    }

    #[test]
    fn keeps_non_phonetic_brackets_and_slashes() {
        assert_eq!(clean("He served [as acting] in 1990/91 and/or later."), "He served [as acting] in 1990/91 and/or later.");
    }

    #[test]
    fn markdown_links_keep_text() {
        assert_eq!(clean("Leader of the [Open VLD](https://nl.wikipedia.org/wiki/Open_Vld) party."), "Leader of the Open VLD party.");
    }

    #[test]
    fn strips_tags_comments_and_entities() {
        assert_eq!(clean("<b>Joe</b>&nbsp;Biden<!-- note --> &amp; co<sup>[2]</sup>"), "Joe Biden & co");
    }

    #[test]
    fn citation_variants() {
        assert_eq!(clean("A[1][ 23 ][a][note 4][citation needed] B"), "A B");
    }

    #[test]
    fn nested_citation_resolves() {
        assert_eq!(clean("x [[1]] y"), "x y");
    }

    #[test]
    fn space_before_comma_and_trailing_semicolon() {
        assert_eq!(clean("Rutte [ˈrʏtə] , born 1967;"), "Rutte, born 1967");
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(clean("  a\n\n b\t c  "), "a b c");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn idempotent_on_samples() {
        for raw in [
            "Guy Verhofstadt[1] (Dutch: [ɣistaːf maːrˈtsɛlə]) is a Belgian...",
            "&amp;lt;b&amp;gt;x",
            "( ; ) [listen] a  ,b",
        ] {
            let once = clean(raw);
            assert_eq!(clean(&once), once);
        }
    }

    #[test]
    fn is_phonetic_detects_audio_words() {
        assert!(is_phonetic("[luister]"));
        assert!(is_phonetic("[ˈbaɪdən]"));
        assert!(!is_phonetic("[as acting]"));
    }

    #[test]
    fn audio_words_match_whole_words_only() {
        assert_eq!(clean("Claudio [Claudio Abbado] x"), "Claudio [Claudio Abbado] x");
        assert!(!is_phonetic("Claudio Abbado"));
        assert!(!is_phonetic("the listener"));
        assert!(is_phonetic("Listen"));
    }

    #[test]
    fn angle_brackets_in_prose_survive() {
        assert_eq!(clean("x<y and z>w are vars"), "x<y and z>w are vars");
        assert_eq!(clean(r#"a <span class="nowrap">b</span> <br/>c"#), "a b c");
    }

    #[test]
    fn ellipsis_keeps_its_spacing() {
        assert_eq!(clean("He said ... and left"), "He said ... and left");
        assert_eq!(clean("a Belgian politician [ˈx] ."), "a Belgian politician.");
    }
}
