//! # Gazetteers embutidos
//!
//! Listas de entidades conhecidas em inglês usadas pelo [`RuleEngine`]. Não pretendem ser
//! completas: cobrem os nomes que mais aparecem em artigos enciclopédicos (países,
//! grandes cidades, organizações internacionais, figuras históricas) e deixam o resto
//! para os padrões ortográficos.

use crate::rule_based::RuleEngine;

const PERSONS: &[&str] = &[
    "Barack Obama", "Obama", "Michelle Obama", "Joe Biden", "Donald Trump", "George Washington",
    "Abraham Lincoln", "Thomas Jefferson", "Franklin Roosevelt", "Theodore Roosevelt",
    "Roosevelt", "Kennedy", "Martin Luther King", "Winston Churchill", "Napoleon", "Napoleon Bonaparte",
    "Julius Caesar", "Alexander the Great", "Albert Einstein", "Einstein", "Isaac Newton",
    "Newton", "Charles Darwin", "Darwin", "Marie Curie", "Galileo", "Galileo Galilei",
    "Nikola Tesla", "Thomas Edison", "Ada Lovelace", "Alan Turing", "Aristotle", "Plato",
    "Socrates", "Confucius", "William Shakespeare", "Shakespeare", "Leonardo da Vinci",
    "Michelangelo", "Pablo Picasso", "Vincent van Gogh", "Wolfgang Amadeus Mozart", "Mozart",
    "Ludwig van Beethoven", "Beethoven", "Karl Marx", "Mahatma Gandhi", "Gandhi",
    "Nelson Mandela", "Queen Elizabeth", "Elizabeth II", "Vladimir Putin", "Xi Jinping",
    "Angela Merkel", "Emmanuel Macron", "Steve Jobs", "Bill Gates", "Elon Musk",
    "Mark Zuckerberg", "Guido van Rossum", "Linus Torvalds", "Tim Berners-Lee",
    "Jesus", "Muhammad", "Buddha", "Adolf Hitler", "Joseph Stalin", "Mao Zedong",
];

const FIRST_NAMES: &[&str] = &[
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Charles", "Christopher", "Daniel", "Matthew", "Anthony", "Mark", "Donald", "Steven",
    "Paul", "Andrew", "Joshua", "Kenneth", "Kevin", "Brian", "George", "Edward", "Ronald",
    "Timothy", "Jason", "Jeffrey", "Ryan", "Jacob", "Gary", "Nicholas", "Eric", "Jonathan",
    "Stephen", "Larry", "Justin", "Scott", "Frank", "Benjamin", "Gregory", "Samuel",
    "Raymond", "Patrick", "Alexander", "Jack", "Dennis", "Henry", "Peter", "Carl", "Arthur",
    "Albert", "Harry", "Louis", "Ernest", "Isaac", "Mary", "Patricia", "Jennifer", "Linda",
    "Elizabeth", "Barbara", "Susan", "Jessica", "Sarah", "Karen", "Nancy", "Lisa", "Margaret",
    "Betty", "Sandra", "Ashley", "Dorothy", "Kimberly", "Emily", "Donna", "Michelle", "Carol",
    "Amanda", "Melissa", "Deborah", "Stephanie", "Rebecca", "Laura", "Sharon", "Cynthia",
    "Kathleen", "Amy", "Anna", "Angela", "Helen", "Catherine", "Rose", "Alice", "Jane",
    "Marie", "Grace", "Charlotte", "Victoria", "Emma", "Olivia", "Sophia",
];

const ORGANIZATIONS: &[&str] = &[
    "United Nations", "UN", "UNESCO", "UNICEF", "World Health Organization", "NATO",
    "European Union", "EU", "World Bank", "International Monetary Fund", "IMF",
    "World Trade Organization", "Red Cross", "NASA", "ESA", "FBI", "CIA", "NSA", "Pentagon",
    "Congress", "Senate", "Supreme Court", "Parliament", "Google", "Microsoft", "Apple Inc.",
    "Amazon", "Meta", "Facebook", "IBM", "Intel", "Tesla", "SpaceX", "Netflix", "Twitter",
    "Wikipedia", "Wikimedia Foundation", "Mozilla", "Harvard", "Harvard University", "MIT",
    "Stanford", "Oxford", "Cambridge University", "Yale", "Princeton", "BBC", "CNN",
    "New York Times", "Reuters", "Toyota", "Samsung", "Sony", "Nintendo", "Volkswagen",
    "Democratic Party", "Republican Party", "Labour Party", "Nobel Foundation", "FIFA",
    "Olympic Committee",
];

const GPES: &[&str] = &[
    "United States", "United States of America", "USA", "America", "United Kingdom",
    "UK", "Britain", "Great Britain", "England", "Scotland", "Wales", "Ireland", "France",
    "Germany", "Italy", "Spain", "Portugal", "Netherlands", "Belgium", "Switzerland",
    "Austria", "Poland", "Sweden", "Norway", "Denmark", "Finland", "Greece", "Russia",
    "Soviet Union", "Ukraine", "Turkey", "Israel", "Egypt", "Iran", "Iraq", "Saudi Arabia",
    "India", "Pakistan", "China", "Japan", "South Korea", "North Korea", "Vietnam",
    "Indonesia", "Australia", "New Zealand", "Canada", "Mexico", "Brazil", "Argentina",
    "Chile", "Colombia", "Peru", "South Africa", "Nigeria", "Kenya", "Ethiopia",
    "New York", "New York City", "Los Angeles", "San Francisco", "Chicago", "Boston",
    "Washington", "Seattle", "Houston", "Philadelphia", "Miami",
    "California", "Texas", "Florida", "Massachusetts", "Illinois", "Hawaii", "London",
    "Paris", "Berlin", "Rome", "Madrid", "Lisbon", "Amsterdam", "Brussels", "Vienna",
    "Moscow", "Athens", "Istanbul", "Jerusalem", "Cairo", "Tokyo", "Beijing", "Shanghai",
    "Hong Kong", "Singapore", "Seoul", "Delhi", "New Delhi", "Mumbai", "Sydney",
    "Melbourne", "Toronto", "Montreal", "Vancouver", "Mexico City", "Rio de Janeiro",
    "São Paulo", "Buenos Aires",
];

const LOCATIONS: &[&str] = &[
    "Europe", "Asia", "Africa", "North America", "South America", "Antarctica", "Oceania",
    "Middle East", "Latin America", "Scandinavia", "Siberia", "Sahara", "Amazon River",
    "Nile", "Mississippi River", "Danube", "Rhine", "Thames", "Atlantic Ocean", "Pacific Ocean",
    "Indian Ocean", "Arctic Ocean", "Mediterranean", "Mediterranean Sea", "Caribbean",
    "Alps", "Andes", "Himalayas", "Rocky Mountains", "Mount Everest", "Grand Canyon",
    "Silicon Valley",
];

const NORPS: &[&str] = &[
    "American", "Americans", "British", "English", "French", "German", "Germans", "Italian",
    "Spanish", "Portuguese", "Dutch", "Russian", "Russians", "Chinese", "Japanese", "Korean",
    "Indian", "Canadian", "Mexican", "Brazilian", "Australian", "Greek", "Roman", "Romans",
    "Egyptian", "Arab", "Jewish", "Christian", "Christians", "Catholic", "Protestant",
    "Muslim", "Muslims", "Islamic", "Hindu", "Buddhist", "Democrat", "Democrats",
    "Republican", "Republicans", "Soviet", "European", "African", "Asian",
];

/// Constrói o motor de regras com todos os gazetteers embutidos.
pub fn build_rule_engine() -> RuleEngine {
    let mut engine = RuleEngine::new();

    for name in PERSONS {
        engine.add_person(name);
    }
    for name in FIRST_NAMES {
        engine.add_first_name(name);
    }
    for name in ORGANIZATIONS {
        engine.add_org(name);
    }
    for name in GPES {
        engine.add_gpe(name);
    }
    for name in LOCATIONS {
        engine.add_location(name);
    }
    for name in NORPS {
        engine.add_norp(name);
    }

    engine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::{EntityCategory, Tag};
    use crate::tokenizer::tokenize;

    #[test]
    fn test_build_rule_engine_loads_all_lists() {
        let engine = build_rule_engine();
        let expected = PERSONS.len()
            + FIRST_NAMES.len()
            + ORGANIZATIONS.len()
            + GPES.len()
            + LOCATIONS.len()
            + NORPS.len();
        assert_eq!(engine.gazetteer_size(), expected);
    }

    #[test]
    fn test_multiword_gpe() {
        let engine = build_rule_engine();
        let tokens = tokenize("He moved to the United States");
        let matches = engine.apply(&tokens);
        let tags: Vec<Option<Tag>> = matches.iter().map(|m| m.as_ref().map(|m| m.tag.clone())).collect();
        assert_eq!(tags[4], Some(Tag::Begin(EntityCategory::Gpe)));
        assert_eq!(tags[5], Some(Tag::Inside(EntityCategory::Gpe)));
    }
}
