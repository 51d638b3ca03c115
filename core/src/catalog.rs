//! Static catalogs and deterministic fake-data pickers.
//!
//! Everything the generator invents (person names, companies, street
//! addresses, product vocabulary) comes from the curated lists in this
//! module, so output depends only on the seed and never on an external
//! dataset or locale.

use crate::rng::StreamRng;

/// One top-level retail category with its price band and vocabulary.
#[derive(Debug)]
pub struct Category {
    pub name: &'static str,
    pub price_min: f64,
    pub price_max: f64,
    pub items: &'static [&'static str],
    pub subcategories: &'static [&'static str],
}

/// The full category catalog. Price bands are dollars.
pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Electronics",
        price_min: 50.0,
        price_max: 2000.0,
        items: &["Smartphone", "Laptop", "Tablet", "Headphones", "Speaker", "Camera", "Monitor"],
        subcategories: &["Mobile Phones", "Computers", "Audio", "Gaming", "Accessories"],
    },
    Category {
        name: "Clothing",
        price_min: 15.0,
        price_max: 300.0,
        items: &["T-Shirt", "Jeans", "Dress", "Jacket", "Sweater", "Shoes", "Hat"],
        subcategories: &["Men's Wear", "Women's Wear", "Children's Wear", "Footwear", "Accessories"],
    },
    Category {
        name: "Home & Garden",
        price_min: 10.0,
        price_max: 500.0,
        items: &["Lamp", "Cushion", "Vase", "Plant Pot", "Tool Set", "Furniture"],
        subcategories: &["Furniture", "Decor", "Kitchen", "Garden", "Storage"],
    },
    Category {
        name: "Books",
        price_min: 8.0,
        price_max: 60.0,
        items: &["Novel", "Cookbook", "Biography", "Guide", "Textbook", "Journal"],
        subcategories: &["Fiction", "Non-Fiction", "Educational", "Children's Books", "Reference"],
    },
    Category {
        name: "Sports & Outdoors",
        price_min: 20.0,
        price_max: 800.0,
        items: &["Running Shoes", "Backpack", "Tent", "Bike", "Fitness Tracker"],
        subcategories: &["Fitness", "Outdoor Recreation", "Team Sports", "Water Sports"],
    },
    Category {
        name: "Beauty & Personal Care",
        price_min: 5.0,
        price_max: 150.0,
        items: &["Shampoo", "Moisturizer", "Perfume", "Makeup Kit", "Soap"],
        subcategories: &["Skincare", "Haircare", "Makeup", "Fragrance", "Personal Hygiene"],
    },
    Category {
        name: "Food & Beverages",
        price_min: 2.0,
        price_max: 50.0,
        items: &["Organic Coffee", "Snack Pack", "Protein Bar", "Tea Set", "Spices"],
        subcategories: &["Beverages", "Snacks", "Organic", "International", "Gourmet"],
    },
    Category {
        name: "Toys & Games",
        price_min: 10.0,
        price_max: 200.0,
        items: &["Board Game", "Action Figure", "Puzzle", "Building Blocks", "Doll"],
        subcategories: &["Educational", "Action Figures", "Board Games", "Electronic Toys"],
    },
    Category {
        name: "Automotive",
        price_min: 15.0,
        price_max: 1500.0,
        items: &["Car Accessories", "Motor Oil", "Tire", "GPS Device", "Car Charger"],
        subcategories: &["Parts", "Accessories", "Maintenance", "Electronics", "Tools"],
    },
    Category {
        name: "Health & Wellness",
        price_min: 10.0,
        price_max: 300.0,
        items: &["Vitamins", "Supplements", "First Aid Kit", "Thermometer"],
        subcategories: &["Supplements", "Medical Devices", "Fitness", "Personal Care"],
    },
    Category {
        name: "Office Supplies",
        price_min: 3.0,
        price_max: 200.0,
        items: &["Notebook", "Pen Set", "Calculator", "Stapler", "Folder"],
        subcategories: &["Stationery", "Technology", "Furniture", "Organization", "Art Supplies"],
    },
    Category {
        name: "Pet Supplies",
        price_min: 5.0,
        price_max: 100.0,
        items: &["Dog Food", "Cat Toy", "Pet Bed", "Leash", "Pet Carrier"],
        subcategories: &["Food", "Toys", "Accessories", "Health", "Grooming"],
    },
];

/// Product-name qualifiers, combined as "{adjective} {item}".
pub const ADJECTIVES: &[&str] = &[
    "Premium", "Deluxe", "Classic", "Modern", "Vintage", "Professional", "Eco-Friendly",
];

/// Words appended to a company name to form a store name. Drawn
/// independently of the typed store format, so the name word and the
/// `store_type` column can disagree.
pub const STORE_TYPE_WORDS: &[&str] = &["Flagship", "Mall", "Outlet", "Express", "Online"];

pub const REFUND_REASONS: &[&str] = &[
    "Customer request",
    "Defective product",
    "Wrong item",
    "Price adjustment",
    "Damaged packaging",
    "Changed mind",
];

pub const PROMOTION_CODES: &[&str] = &[
    "SAVE10", "SUMMER20", "NEWCUST15", "LOYALTY5", "WEEKEND25", "FLASH30",
];

/// Deterministic person/company/address generator over curated lists.
pub struct Catalog;

impl Catalog {
    /// Generate a full name (first + last) deterministically.
    pub fn full_name(rng: &mut StreamRng) -> String {
        let first = Self::first_name(rng);
        let last = Self::last_name(rng);
        format!("{first} {last}")
    }

    pub fn first_name(rng: &mut StreamRng) -> &'static str {
        *rng.pick(Self::first_names())
    }

    pub fn last_name(rng: &mut StreamRng) -> &'static str {
        *rng.pick(Self::last_names())
    }

    /// Generate a company name in one of the shapes vendor registries
    /// are full of: "Surname Suffix", "Surname-Surname", or
    /// "Prefix Industry Suffix".
    pub fn company_name(rng: &mut StreamRng) -> String {
        match rng.next_u64_below(3) {
            0 => format!("{} {}", Self::last_name(rng), rng.pick(Self::company_suffixes())),
            1 => format!("{}-{}", Self::last_name(rng), Self::last_name(rng)),
            _ => format!(
                "{} {} {}",
                rng.pick(Self::company_prefixes()),
                rng.pick(Self::company_industries()),
                rng.pick(Self::company_suffixes())
            ),
        }
    }

    /// A single street-address line, occasionally with a unit number.
    pub fn street_address(rng: &mut StreamRng) -> String {
        let number = 100 + rng.next_u64_below(9900);
        let name = rng.pick(Self::street_names());
        let suffix = rng.pick(Self::street_suffixes());
        let mut line = format!("{number} {name} {suffix}");
        if rng.chance(0.25) {
            let unit = 1 + rng.next_u64_below(999);
            line.push_str(&format!(" Apt. {unit}"));
        }
        line
    }

    pub fn city(rng: &mut StreamRng) -> &'static str {
        *rng.pick(Self::cities())
    }

    pub fn state(rng: &mut StreamRng) -> &'static str {
        *rng.pick(Self::states())
    }

    pub fn zip_code(rng: &mut StreamRng) -> String {
        format!("{:05}", 10000 + rng.next_u64_below(90000))
    }

    /// Phone numbers come in three formats on purpose: inconsistent
    /// formatting is part of the data-quality story downstream.
    pub fn phone_number(rng: &mut StreamRng) -> String {
        let area = 200 + rng.next_u64_below(800);
        let exchange = 200 + rng.next_u64_below(800);
        let line = rng.next_u64_below(10000);
        match rng.next_u64_below(3) {
            0 => format!("({area}) {exchange}-{line:04}"),
            1 => format!("{area}-{exchange}-{line:04}"),
            _ => format!("+1-{area}-{exchange}-{line:04}"),
        }
    }

    /// Email derived from the (pre-corruption) name parts. Collisions
    /// across customers are expected and feed the duplicate-email path.
    pub fn email(first: &str, last: &str, rng: &mut StreamRng) -> String {
        let domain = rng.pick(Self::email_domains());
        format!("{}.{}@{}", first.to_lowercase(), last.to_lowercase(), domain)
    }

    /// One lorem word, lowercase.
    pub fn word(rng: &mut StreamRng) -> &'static str {
        *rng.pick(Self::lorem_words())
    }

    /// Filler sentence of `min_words..=max_words` lorem words.
    pub fn sentence(rng: &mut StreamRng, min_words: usize, max_words: usize) -> String {
        let span = (max_words - min_words + 1) as u64;
        let count = min_words + rng.next_u64_below(span) as usize;
        let mut words = Vec::with_capacity(count);
        for _ in 0..count {
            words.push(*rng.pick(Self::lorem_words()));
        }
        let mut text = words.join(" ");
        text[..1].make_ascii_uppercase();
        text.push('.');
        text
    }

    /// Curated list of 120 common first names.
    fn first_names() -> &'static [&'static str] {
        &[
            "Aaron", "Adam", "Alan", "Albert", "Alex", "Andrew", "Anthony", "Arthur",
            "Austin", "Benjamin", "Blake", "Bradley", "Brandon", "Brian", "Bruce", "Caleb",
            "Calvin", "Carl", "Charles", "Christian", "Christopher", "Cody", "Colin", "Craig",
            "Curtis", "Dale", "Daniel", "David", "Dennis", "Derek", "Dominic", "Douglas",
            "Dustin", "Dylan", "Edward", "Eric", "Ethan", "Eugene", "Evan", "Frank",
            "Gabriel", "Gary", "George", "Gerald", "Gordon", "Grant", "Gregory", "Harold",
            "Henry", "Ian", "Isaac", "Jack", "Jacob", "James", "Jason", "Jeffrey",
            "Jeremy", "Jesse", "Joel", "John",
            "Abigail", "Alice", "Alyssa", "Amanda", "Amber", "Amy", "Andrea", "Angela",
            "Anna", "April", "Ashley", "Audrey", "Bethany", "Brenda", "Brianna", "Brooke",
            "Caitlin", "Carmen", "Carol", "Caroline", "Cassandra", "Catherine", "Charlotte", "Chloe",
            "Christina", "Claire", "Courtney", "Crystal", "Cynthia", "Danielle", "Deborah", "Denise",
            "Diana", "Donna", "Eleanor", "Elizabeth", "Emily", "Emma", "Erica", "Erin",
            "Faith", "Fiona", "Gabrielle", "Gina", "Grace", "Hannah", "Heather", "Heidi",
            "Holly", "Isabella", "Jacqueline", "Jade", "Jasmine", "Jennifer", "Jessica", "Jill",
            "Joanna", "Jordan", "Julia", "Karen",
        ]
    }

    /// Curated list of 182 common surnames.
    fn last_names() -> &'static [&'static str] {
        &[
            "Adams", "Allen", "Anderson", "Bailey", "Baker", "Barnes", "Bell", "Bennett",
            "Black", "Boyd", "Brooks", "Brown", "Bryant", "Burke", "Burns", "Butler",
            "Campbell", "Carpenter", "Carroll", "Carter", "Chambers", "Chapman", "Clark", "Cole",
            "Coleman", "Collins", "Cooper", "Cox", "Crawford", "Cunningham", "Curtis", "Daniels",
            "Davidson", "Davis", "Dawson", "Dean", "Dixon", "Douglas", "Doyle", "Duncan",
            "Dunn", "Edwards", "Elliott", "Ellis", "Evans", "Ferguson", "Fisher", "Fleming",
            "Fletcher", "Ford", "Foster", "Fowler", "Fox", "Franklin", "Freeman", "Fuller",
            "Gardner", "Garrett", "Gibson", "Gilbert", "Gordon", "Graham", "Grant", "Gray",
            "Green", "Griffin", "Hall", "Hamilton", "Hansen", "Harper", "Harrison", "Hart",
            "Harvey", "Hawkins", "Hayes", "Henderson", "Henry", "Hill", "Holland", "Holmes",
            "Hopkins", "Howard", "Hudson", "Hughes", "Hunt", "Hunter", "Jacobs", "Jennings",
            "Jensen", "Johnson", "Johnston", "Jones", "Jordan", "Kennedy", "King", "Knight",
            "Lambert", "Lane", "Lawrence", "Lawson", "Lee", "Lewis", "Little", "Lloyd",
            "Logan", "Long", "Lucas", "Lynch", "Marshall", "Mason", "Matthews", "May",
            "McCarthy", "McDonald", "Mills", "Mitchell", "Nelson", "Newman", "Nichols", "Oliver",
            "Owens", "Palmer", "Parker", "Patterson", "Payne", "Pearson", "Perkins", "Perry",
            "Peters", "Peterson", "Phillips", "Porter", "Powell", "Price", "Quinn", "Reed",
            "Reynolds", "Rhodes", "Rice", "Richards", "Richardson", "Riley", "Roberts", "Robertson",
            "Robinson", "Rogers", "Rose", "Ross", "Russell", "Ryan", "Sanders", "Scott",
            "Shaw", "Simmons", "Simpson", "Smith", "Spencer", "Stevens", "Stewart", "Stone",
            "Sullivan", "Taylor", "Thomas", "Thompson", "Turner", "Walker", "Wallace", "Walsh",
            "Ward", "Warren", "Watson", "Weaver", "Webb", "Wells", "West", "Wheeler",
            "White", "Williams", "Wilson", "Wood", "Wright", "Young",
        ]
    }

    fn company_prefixes() -> &'static [&'static str] {
        &[
            "Premier", "Summit", "Pioneer", "Cascade", "Harbor", "Sterling", "Beacon",
            "Crestline", "Evergreen", "Keystone", "Northstar", "Pacific", "Atlas",
            "Granite", "Horizon", "Liberty", "Meridian", "Redwood", "Silverline", "Vantage",
        ]
    }

    fn company_industries() -> &'static [&'static str] {
        &[
            "Trading", "Retail", "Goods", "Supply", "Distribution", "Brands",
            "Outfitters", "Mercantile", "Imports", "Commerce", "Provisions", "Wholesale",
        ]
    }

    fn company_suffixes() -> &'static [&'static str] {
        &[
            "LLC", "Inc", "Corp", "Co", "Group", "Ltd", "Partners", "Holdings",
        ]
    }

    fn street_names() -> &'static [&'static str] {
        &[
            "Oak", "Maple", "Cedar", "Pine", "Elm", "Washington", "Lake", "Hill",
            "Main", "Park", "River", "Sunset", "Highland", "Madison", "Jefferson", "Lincoln",
            "Franklin", "Chestnut", "Walnut", "Willow", "Spring", "Meadow", "Forest", "Ridge",
        ]
    }

    fn street_suffixes() -> &'static [&'static str] {
        &["Street", "Avenue", "Boulevard", "Drive", "Lane", "Road", "Court", "Way"]
    }

    fn cities() -> &'static [&'static str] {
        &[
            "Austin", "Boston", "Charlotte", "Chicago", "Columbus", "Dallas", "Denver",
            "Detroit", "El Paso", "Fort Worth", "Fresno", "Houston", "Indianapolis",
            "Jacksonville", "Kansas City", "Las Vegas", "Los Angeles", "Memphis", "Miami",
            "Nashville", "New York", "Oklahoma City", "Philadelphia", "Phoenix", "Portland",
            "Sacramento", "San Antonio", "San Diego", "San Francisco", "San Jose",
            "Seattle", "Tucson",
        ]
    }

    fn states() -> &'static [&'static str] {
        &[
            "Alabama", "Arizona", "California", "Colorado", "Connecticut", "Florida",
            "Georgia", "Illinois", "Indiana", "Iowa", "Kansas", "Kentucky", "Louisiana",
            "Maryland", "Massachusetts", "Michigan", "Minnesota", "Missouri", "Nevada",
            "New Jersey", "New Mexico", "New York", "North Carolina", "Ohio", "Oklahoma",
            "Oregon", "Pennsylvania", "Tennessee", "Texas", "Utah", "Virginia",
            "Washington", "Wisconsin",
        ]
    }

    fn email_domains() -> &'static [&'static str] {
        &[
            "gmail.com", "yahoo.com", "hotmail.com", "outlook.com", "aol.com",
            "icloud.com", "example.com",
        ]
    }

    fn lorem_words() -> &'static [&'static str] {
        &[
            "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit",
            "sed", "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et",
            "dolore", "magna", "aliqua", "enim", "ad", "minim", "veniam", "quis",
            "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip", "ex", "ea",
            "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit", "voluptate",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    #[test]
    fn name_generation_is_deterministic() {
        let mut rng1 = RngBank::new(12345).for_stream(StreamSlot::Customers);
        let mut rng2 = RngBank::new(12345).for_stream(StreamSlot::Customers);

        for _ in 0..50 {
            assert_eq!(
                Catalog::full_name(&mut rng1),
                Catalog::full_name(&mut rng2),
                "Same seed should produce same name"
            );
        }
    }

    #[test]
    fn generates_valid_full_names() {
        let mut rng = RngBank::new(12345).for_stream(StreamSlot::Customers);

        for _ in 0..100 {
            let name = Catalog::full_name(&mut rng);
            let parts: Vec<&str> = name.split_whitespace().collect();
            assert_eq!(parts.len(), 2, "Name should have exactly 2 parts: {}", name);
            assert!(!parts[0].is_empty(), "First name should not be empty");
            assert!(!parts[1].is_empty(), "Last name should not be empty");
        }
    }

    #[test]
    fn generates_valid_company_names() {
        let mut rng = RngBank::new(12345).for_stream(StreamSlot::Products);

        for _ in 0..50 {
            let name = Catalog::company_name(&mut rng);
            assert!(!name.is_empty(), "Company name should not be empty");
            let parts: Vec<&str> = name.split_whitespace().collect();
            assert!(!parts.is_empty(), "Company name should have at least 1 part: {}", name);
        }
    }

    #[test]
    fn category_catalog_is_complete() {
        assert_eq!(CATEGORIES.len(), 12, "category catalog must stay at 12 entries");
        for category in CATEGORIES {
            assert!(category.price_min > 0.0, "{}: price_min must be positive", category.name);
            assert!(
                category.price_max > category.price_min,
                "{}: price band must be non-degenerate",
                category.name
            );
            assert!(!category.items.is_empty(), "{}: needs item words", category.name);
            assert!(!category.subcategories.is_empty(), "{}: needs subcategories", category.name);
        }
    }

    #[test]
    fn sentence_respects_word_bounds() {
        let mut rng = RngBank::new(7).for_stream(StreamSlot::Products);
        for _ in 0..100 {
            let text = Catalog::sentence(&mut rng, 3, 8);
            let words = text.split_whitespace().count();
            assert!((3..=8).contains(&words), "word count {words} out of bounds: {text}");
            assert!(text.ends_with('.'), "sentence should end with a period");
        }
    }
}
