//! Fixed option lists offered by the browse filters and the registration form.

pub const CATEGORIES: &[&str] = &[
    "Singer",
    "Dancer",
    "Speaker",
    "DJ",
    "Performer",
    "Choreographer",
    "Music Producer",
    "Motivational Coach",
    "Event Host",
    "Wellness Coach",
];

pub const LOCATIONS: &[&str] = &[
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Pune",
    "Jaipur",
    "Gurgaon",
    "Hyderabad",
    "Chennai",
    "Kolkata",
    "Ahmedabad",
];

pub const PRICE_RANGES: &[&str] = &[
    "₹0 - ₹25,000",
    "₹25,000 - ₹50,000",
    "₹50,000 - ₹1,00,000",
    "₹1,00,000 - ₹2,00,000",
    "₹2,00,000+",
];

pub const LANGUAGES: &[&str] = &[
    "English",
    "Hindi",
    "Marathi",
    "Tamil",
    "Telugu",
    "Kannada",
    "Bengali",
    "Gujarati",
    "Punjabi",
    "Malayalam",
    "Rajasthani",
    "Konkani",
];
