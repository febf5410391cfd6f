use std::sync::LazyLock;

/// Store sections, in the order a shopping trip walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Department {
    Produce,
    Bakery,
    Meat,
    Fish,
    Dairy,
    Pantry,
    Spices,
    Frozen,
    Other,
}

impl Department {
    pub fn label(self) -> &'static str {
        match self {
            Department::Produce => "Fruit & vegetables",
            Department::Bakery => "Bakery",
            Department::Meat => "Meat",
            Department::Fish => "Fish & seafood",
            Department::Dairy => "Dairy & eggs",
            Department::Pantry => "Pantry",
            Department::Spices => "Spices & condiments",
            Department::Frozen => "Frozen",
            Department::Other => "Other",
        }
    }
}

/// Keyword → department. Keywords match whole words (plural or not) and
/// multi-word keywords match as a phrase. First match wins, so more specific
/// keywords come before generic ones.
static DEPARTMENT_KEYWORDS: LazyLock<Vec<(&'static str, Department)>> = LazyLock::new(|| {
    vec![
        ("frozen", Department::Frozen),
        ("ice cream", Department::Frozen),
        ("eggplant", Department::Produce),
        ("bell pepper", Department::Produce),
        ("chickpea", Department::Pantry),
        ("champignon", Department::Produce),
        ("stock", Department::Pantry),
        ("cracker", Department::Pantry),
        ("peas", Department::Frozen),
        ("lentil", Department::Pantry),
        ("bean", Department::Pantry),
        ("rice", Department::Pantry),
        ("pasta", Department::Pantry),
        ("spaghetti", Department::Pantry),
        ("macaroni", Department::Pantry),
        ("noodle", Department::Pantry),
        ("flour", Department::Pantry),
        ("oil", Department::Pantry),
        ("vinegar", Department::Spices),
        ("tomato sauce", Department::Pantry),
        ("tuna", Department::Fish),
        ("cod", Department::Fish),
        ("hake", Department::Fish),
        ("salmon", Department::Fish),
        ("prawn", Department::Fish),
        ("shrimp", Department::Fish),
        ("squid", Department::Fish),
        ("mussel", Department::Fish),
        ("fish", Department::Fish),
        ("chicken", Department::Meat),
        ("beef", Department::Meat),
        ("pork", Department::Meat),
        ("lamb", Department::Meat),
        ("ham", Department::Meat),
        ("chorizo", Department::Meat),
        ("bacon", Department::Meat),
        ("sausage", Department::Meat),
        ("mince", Department::Meat),
        ("milk", Department::Dairy),
        ("cheese", Department::Dairy),
        ("yogurt", Department::Dairy),
        ("butter", Department::Dairy),
        ("cream", Department::Dairy),
        ("egg", Department::Dairy),
        ("bread", Department::Bakery),
        ("baguette", Department::Bakery),
        ("tortilla wrap", Department::Bakery),
        ("pizza dough", Department::Bakery),
        ("salt", Department::Spices),
        ("pepper", Department::Spices),
        ("paprika", Department::Spices),
        ("cumin", Department::Spices),
        ("oregano", Department::Spices),
        ("mustard", Department::Spices),
        ("mayonnaise", Department::Spices),
        ("potato", Department::Produce),
        ("onion", Department::Produce),
        ("garlic", Department::Produce),
        ("tomato", Department::Produce),
        ("lettuce", Department::Produce),
        ("carrot", Department::Produce),
        ("zucchini", Department::Produce),
        ("courgette", Department::Produce),
        ("spinach", Department::Produce),
        ("leek", Department::Produce),
        ("lemon", Department::Produce),
        ("apple", Department::Produce),
        ("avocado", Department::Produce),
        ("cucumber", Department::Produce),
        ("mushroom", Department::Produce),
        ("parsley", Department::Produce),
    ]
});

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// "tomatoes" -> "tomato", "lentils" -> "lentil". Leaves "ss" endings alone.
fn singular(word: &str) -> &str {
    if word.ends_with("oes") {
        return &word[..word.len() - 2];
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') => stem,
        _ => word,
    }
}

fn word_matches(word: &str, keyword: &str) -> bool {
    word == keyword || singular(word) == keyword
}

fn contains_keyword(name_words: &[&str], keyword: &str) -> bool {
    let keyword_words = words(keyword);
    if keyword_words.is_empty() || keyword_words.len() > name_words.len() {
        return false;
    }
    name_words.windows(keyword_words.len()).any(|window| {
        window
            .iter()
            .zip(&keyword_words)
            .all(|(word, keyword)| word_matches(word, keyword))
    })
}

/// Classify a normalized ingredient name.
pub fn classify(normalized_name: &str) -> Department {
    let name_words = words(normalized_name);
    DEPARTMENT_KEYWORDS
        .iter()
        .find(|(keyword, _)| contains_keyword(&name_words, keyword))
        .map(|&(_, department)| department)
        .unwrap_or(Department::Other)
}
