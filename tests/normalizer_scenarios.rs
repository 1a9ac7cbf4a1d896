use spamsift::analysis::tokenizer::TokenizerKind;
use spamsift::error::Result;
use spamsift::normalizer::{NormalizerConfig, TextNormalizer};

fn unicode_word_normalizer() -> Result<TextNormalizer> {
    TextNormalizer::new(NormalizerConfig {
        tokenizer: TokenizerKind::UnicodeWord,
    })
}

#[test]
fn spam_message_reduces_to_content_stems() -> Result<()> {
    let normalizer = TextNormalizer::default_english()?;

    let processed =
        normalizer.try_normalize("URGENT! Your mobile number has been awarded a bonus, call 09061701461 now")?;
    assert_eq!(
        processed.as_str(),
        "urgent mobil number award bonu call 09061701461"
    );
    Ok(())
}

#[test]
fn ham_message_drops_contractions_and_stop_words() -> Result<()> {
    let normalizer = TextNormalizer::default_english()?;

    let processed = normalizer.try_normalize("I'll be home late tonight, save me some dinner")?;
    assert_eq!(processed.as_str(), "home late tonight save dinner");
    assert_eq!(processed.tokens().count(), 5);
    Ok(())
}

#[test]
fn normalization_is_stable_on_its_own_output() -> Result<()> {
    let normalizer = TextNormalizer::default_english()?;
    let messages = [
        "Congratulations! You WON a free prize, claim now!!!",
        "I'll be home late tonight, save me some dinner",
        "Hello, how are you today?",
    ];

    for message in messages {
        let once = normalizer.normalize(message);
        let twice = normalizer.normalize(once.as_str());
        assert_eq!(
            twice.tokens().collect::<Vec<_>>(),
            once.tokens().collect::<Vec<_>>(),
            "renormalizing {message:?}"
        );
    }
    Ok(())
}

#[test]
fn trace_reports_every_stage_in_order() -> Result<()> {
    let normalizer = TextNormalizer::default_english()?;

    let (processed, stages) = normalizer.trace("Free entry!! Winners claim prizes")?;
    let names: Vec<&str> = stages.iter().map(|s| s.stage.as_str()).collect();
    assert_eq!(
        names,
        vec!["lowercase", "tokenize", "alphanumeric", "stop", "stem"]
    );

    assert_eq!(stages[0].tokens, vec!["free entry!! winners claim prizes"]);
    assert!(stages[1].tokens.iter().any(|t| t == "!"));
    assert!(stages[2].tokens.iter().all(|t| t != "!"));

    let last = &stages[stages.len() - 1];
    assert_eq!(last.tokens.join(" "), processed.as_str());
    assert_eq!(processed.as_str(), "free entri winner claim prize");
    Ok(())
}

#[test]
fn tokenizers_disagree_on_hyphenated_compounds() -> Result<()> {
    let treebank = TextNormalizer::default_english()?;
    let unicode_word = unicode_word_normalizer()?;

    // The treebank tokenizer keeps the compound whole, so the alphanumeric
    // filter drops it.
    assert!(treebank.normalize("free-entry").is_empty());
    assert_eq!(unicode_word.normalize("free-entry").as_str(), "free entri");
    Ok(())
}

#[test]
fn tokenizers_agree_on_plain_sentences() -> Result<()> {
    let treebank = TextNormalizer::default_english()?;
    let unicode_word = unicode_word_normalizer()?;

    let message = "Hello, how are you today?";
    assert_eq!(
        treebank.normalize(message).as_str(),
        unicode_word.normalize(message).as_str()
    );
    Ok(())
}

#[test]
fn invalid_utf8_is_reported_not_swallowed() -> Result<()> {
    let normalizer = TextNormalizer::default_english()?;

    let err = normalizer.normalize_bytes(&[0x66, 0x72, 0x65, 0x65, 0xc3]).unwrap_err();
    assert!(err.to_string().starts_with("Text processing error"));

    let processed = normalizer.normalize_bytes("free prizes".as_bytes())?;
    assert_eq!(processed.as_str(), "free prize");
    Ok(())
}

#[test]
fn words_with_combining_marks_are_dropped() -> Result<()> {
    let normalizer = TextNormalizer::default_english()?;

    assert_eq!(normalizer.normalize("किताब free").as_str(), "free");
    assert_eq!(normalizer.normalize("कम free").as_str(), "कम free");
    Ok(())
}

#[test]
fn period_inside_curly_quotes_keeps_the_word() -> Result<()> {
    let normalizer = TextNormalizer::default_english()?;

    assert_eq!(
        normalizer.normalize("he said “win cash.”").as_str(),
        "said win cash"
    );
    Ok(())
}
