use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref PUNCT: Regex =
        Regex::new(r##"[!"#$%&'()*+,./:;<=>?@\[\]^_`{|}~]"##).expect("valid regex");
    // Zero-width matches at word boundaries are intentional: replacing them
    // with a space is what detaches intra-word hyphens ("cat-sat" ->
    // "cat - sat") before the lone-hyphen pass removes them.
    static ref DIGIT_RUN: Regex = Regex::new(r"\b\d*\b").expect("valid regex");
    static ref LONE_HYPHEN: Regex = Regex::new(r"\s-\s").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Normalize raw text into ordered, lowercase, stopword-free tokens.
///
/// The stages run in a fixed order; each one assumes the shape the previous
/// stage produced. Any input degrades to an empty vector, never an error.
pub fn normalize(text: &str) -> Vec<String> {
    let text = text.nfkc().collect::<String>().to_lowercase();
    let text = PUNCT.replace_all(&text, "");
    let text = DIGIT_RUN.replace_all(&text, " ");
    let text = LONE_HYPHEN.replace_all(&text, " ");
    text.split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \t\n ").is_empty());
    }

    #[test]
    fn lowercases_strips_punctuation_and_stopwords() {
        assert_eq!(normalize("THE Cat-sat!"), vec!["cat", "sat"]);
    }

    #[test]
    fn pure_punctuation_and_stopwords_vanish() {
        assert!(normalize("!!! ... ???").is_empty());
        assert!(normalize("the and or of").is_empty());
    }

    #[test]
    fn standalone_digit_runs_are_dropped() {
        assert_eq!(normalize("released 2024 edition"), vec!["released", "edition"]);
        // Digits embedded in a word are not standalone and stay put.
        assert_eq!(normalize("utf8 rocks"), vec!["utf8", "rocks"]);
    }

    #[test]
    fn lone_hyphens_disappear_and_word_hyphens_split() {
        assert_eq!(normalize("cats - dogs"), vec!["cats", "dogs"]);
        assert_eq!(normalize("well-known fact"), vec!["well", "known", "fact"]);
    }

    #[test]
    fn token_order_is_preserved() {
        assert_eq!(
            normalize("Quick brown foxes jump"),
            vec!["quick", "brown", "foxes", "jump"]
        );
    }
}
