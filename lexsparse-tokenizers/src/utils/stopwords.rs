use std::sync::OnceLock;

use fxhash::FxHashSet as HashSet;

use crate::config::Language;

/// English stopwords, the list commonly shipped with NLTK.
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static ENGLISH: OnceLock<HashSet<&'static str>> = OnceLock::new();

///
/// Get the stopword set for a language.
///
/// # Arguments:
/// - `language`: the language to look up
///
/// # Returns:
/// - `Option<&HashSet<&str>>`: the lower-cased stopwords, or `None` when no list is bundled
///
pub fn stopwords_for(language: Language) -> Option<&'static HashSet<&'static str>> {
    match language {
        Language::English => {
            Some(ENGLISH.get_or_init(|| ENGLISH_STOPWORDS.iter().copied().collect()))
        }
        _ => None,
    }
}

/// A token counts as punctuation when every character in it is punctuation.
pub fn is_punctuation(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_punctuation() || is_unicode_punct(c))
}

fn is_unicode_punct(c: char) -> bool {
    // general punctuation block and common CJK/fullwidth marks
    matches!(c, '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{205E}' | '\u{3000}'..='\u{303F}' | '\u{FF01}'..='\u{FF0F}' | '¡' | '¿' | '«' | '»' | '§' | '¶' | '·')
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_english_stopwords() {
        let stopwords = stopwords_for(Language::English).unwrap();
        assert_eq!(stopwords.contains("the"), true);
        assert_eq!(stopwords.contains("which"), true);
        assert_eq!(stopwords.contains("fox"), false);
    }

    #[rstest]
    fn test_no_list_for_other_languages() {
        assert!(stopwords_for(Language::German).is_none());
    }

    #[rstest]
    #[case("?", true)]
    #[case("...", true)]
    #[case("—", true)]
    #[case("«", true)]
    #[case("fox", false)]
    #[case("c++", false)]
    #[case("", false)]
    fn test_is_punctuation(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_punctuation(token), expected);
    }
}
