

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::search::Document;


pub const CATEGORY_EDUCATION: &str = "Importance of Education";
pub const CATEGORY_KINDNESS: &str = "Being Kind to Others";
pub const CATEGORY_CONTRIBUTING: &str = "Contributing to Others";
pub const CATEGORY_HARD_WORK: &str = "Hard Work";
pub const CATEGORY_FAILURE: &str = "Overcoming Failure";


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    pub fn to_document(&self) -> Document {
        Document::new(self.text.clone(), self.category.clone())
    }
}

impl From<Document> for Quote {
    fn from(doc: Document) -> Self {
        Self {
            text: doc.text,
            category: doc.category,
        }
    }
}


const QUOTES_DATA: [(&str, &str); 24] = [
    ("Education is the most powerful weapon which you can use to change the world. – Nelson Mandela", CATEGORY_EDUCATION),
    ("The only person who is educated is the one who has learned how to learn and change. – Carl Rogers", CATEGORY_EDUCATION),
    ("An investment in knowledge pays the best interest. – Benjamin Franklin", CATEGORY_EDUCATION),
    ("Education is not the filling of a pail, but the lighting of a fire. – William Butler Yeats", CATEGORY_EDUCATION),
    ("The roots of education are bitter, but the fruit is sweet. – Aristotle", CATEGORY_EDUCATION),

    ("No act of kindness, no matter how small, is ever wasted. – Aesop", CATEGORY_KINDNESS),
    ("Kindness is a language which the deaf can hear and the blind can see. – Mark Twain", CATEGORY_KINDNESS),
    ("Carry out a random act of kindness, with no expectation of reward, safe in the knowledge that one day someone might do the same for you. – Princess Diana", CATEGORY_KINDNESS),
    ("A single act of kindness throws out roots in all directions, and the roots spring up and make new trees. – Amelia Earhart", CATEGORY_KINDNESS),

    ("The best way to find yourself is to lose yourself in the service of others. – Mahatma Gandhi", CATEGORY_CONTRIBUTING),
    ("We make a living by what we get. We make a life by what we give. – Winston Churchill", CATEGORY_CONTRIBUTING),
    ("No one has ever become poor by giving. – Anne Frank", CATEGORY_CONTRIBUTING),
    ("The meaning of life is to find your gift. The purpose of life is to give it away. – Pablo Picasso", CATEGORY_CONTRIBUTING),
    ("Only a life lived for others is a life worthwhile. – Albert Einstein", CATEGORY_CONTRIBUTING),

    ("There is no substitute for hard work. – Thomas Edison", CATEGORY_HARD_WORK),
    ("The only place where success comes before work is in the dictionary. – Vidal Sassoon", CATEGORY_HARD_WORK),
    ("I'm a greater believer in luck, and I find the harder I work the more I have of it. – Thomas Jefferson", CATEGORY_HARD_WORK),
    ("Success is not the result of spontaneous combustion. You must set yourself on fire. – Arnold H. Glasow", CATEGORY_HARD_WORK),
    ("Hard work beats talent when talent doesn't work hard. – Tim Notke", CATEGORY_HARD_WORK),

    ("Failure is simply the opportunity to begin again, this time more intelligently. – Henry Ford", CATEGORY_FAILURE),
    ("Success is not final, failure is not fatal: It is the courage to continue that counts. – Winston Churchill", CATEGORY_FAILURE),
    ("Our greatest glory is not in never falling, but in rising every time we fall. – Confucius", CATEGORY_FAILURE),
    ("The only real mistake is the one from which we learn nothing. – Henry Ford", CATEGORY_FAILURE),
    ("I have not failed. I've just found 10,000 ways that won't work. – Thomas Edison", CATEGORY_FAILURE),
];


pub const QUOTE_COUNT: usize = QUOTES_DATA.len();


pub fn all_quotes() -> Vec<Quote> {
    QUOTES_DATA
        .iter()
        .map(|(text, category)| Quote::new(*text, *category))
        .collect()
}


pub fn random_quote() -> Quote {
    // QUOTES_DATA is a non-empty const array
    let (text, category) = QUOTES_DATA
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(QUOTES_DATA[0]);
    Quote::new(text, category)
}


pub fn quotes_by_category(category: Option<&str>) -> Vec<Quote> {
    match category {
        None => all_quotes(),
        Some(wanted) => QUOTES_DATA
            .iter()
            .filter(|(_, category)| *category == wanted)
            .map(|(text, category)| Quote::new(*text, *category))
            .collect(),
    }
}


/// Categories with their quote counts, in dataset order.
pub fn categories() -> Vec<(&'static str, usize)> {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for &(_, category) in QUOTES_DATA.iter() {
        if let Some(entry) = counts.iter_mut().find(|entry| entry.0 == category) {
            entry.1 += 1;
        } else {
            counts.push((category, 1));
        }
    }
    counts
}
