//! Option lists shared by the built-in forms.

use crate::schema::Choice;

/// Countries offered to applicants, as (value, label, calling code).
pub const APPLICANT_COUNTRIES: &[(&str, &str, &str)] = &[
    ("eg", "Egypt", "+20"),
    ("us", "United States", "+1"),
    ("ca", "Canada", "+1"),
    ("uk", "United Kingdom", "+44"),
    ("de", "Germany", "+49"),
    ("fr", "France", "+33"),
    ("sa", "Saudi Arabia", "+966"),
    ("ae", "UAE", "+971"),
    ("in", "India", "+91"),
];

/// Countries offered to prospective clients, as (value, label, calling
/// code). `other` covers everything not listed.
pub const CLIENT_COUNTRIES: &[(&str, &str, &str)] = &[
    ("us", "United States", "+1"),
    ("ca", "Canada", "+1"),
    ("uk", "United Kingdom", "+44"),
    ("au", "Australia", "+61"),
    ("de", "Germany", "+49"),
    ("fr", "France", "+33"),
    ("it", "Italy", "+39"),
    ("es", "Spain", "+34"),
    ("nl", "Netherlands", "+31"),
    ("be", "Belgium", "+32"),
    ("ch", "Switzerland", "+41"),
    ("at", "Austria", "+43"),
    ("se", "Sweden", "+46"),
    ("no", "Norway", "+47"),
    ("dk", "Denmark", "+45"),
    ("fi", "Finland", "+358"),
    ("pl", "Poland", "+48"),
    ("cz", "Czech Republic", "+420"),
    ("hu", "Hungary", "+36"),
    ("ro", "Romania", "+40"),
    ("bg", "Bulgaria", "+359"),
    ("hr", "Croatia", "+385"),
    ("si", "Slovenia", "+386"),
    ("sk", "Slovakia", "+421"),
    ("lt", "Lithuania", "+370"),
    ("lv", "Latvia", "+371"),
    ("ee", "Estonia", "+372"),
    ("ie", "Ireland", "+353"),
    ("pt", "Portugal", "+351"),
    ("gr", "Greece", "+30"),
    ("cy", "Cyprus", "+357"),
    ("mt", "Malta", "+356"),
    ("lu", "Luxembourg", "+352"),
    ("jp", "Japan", "+81"),
    ("kr", "South Korea", "+82"),
    ("cn", "China", "+86"),
    ("in", "India", "+91"),
    ("br", "Brazil", "+55"),
    ("mx", "Mexico", "+52"),
    ("ar", "Argentina", "+54"),
    ("cl", "Chile", "+56"),
    ("co", "Colombia", "+57"),
    ("pe", "Peru", "+51"),
    ("ve", "Venezuela", "+58"),
    ("uy", "Uruguay", "+598"),
    ("py", "Paraguay", "+595"),
    ("bo", "Bolivia", "+591"),
    ("ec", "Ecuador", "+593"),
    ("gy", "Guyana", "+592"),
    ("sr", "Suriname", "+597"),
    ("fk", "Falkland Islands", "+500"),
    ("ru", "Russia", "+7"),
    ("ua", "Ukraine", "+380"),
    ("by", "Belarus", "+375"),
    ("md", "Moldova", "+373"),
    ("ge", "Georgia", "+995"),
    ("am", "Armenia", "+374"),
    ("az", "Azerbaijan", "+994"),
    ("kz", "Kazakhstan", "+7"),
    ("uz", "Uzbekistan", "+998"),
    ("kg", "Kyrgyzstan", "+996"),
    ("tj", "Tajikistan", "+992"),
    ("tm", "Turkmenistan", "+993"),
    ("af", "Afghanistan", "+93"),
    ("pk", "Pakistan", "+92"),
    ("bd", "Bangladesh", "+880"),
    ("lk", "Sri Lanka", "+94"),
    ("np", "Nepal", "+977"),
    ("bt", "Bhutan", "+975"),
    ("mv", "Maldives", "+960"),
    ("my", "Malaysia", "+60"),
    ("sg", "Singapore", "+65"),
    ("th", "Thailand", "+66"),
    ("vn", "Vietnam", "+84"),
    ("ph", "Philippines", "+63"),
    ("id", "Indonesia", "+62"),
    ("mm", "Myanmar", "+95"),
    ("kh", "Cambodia", "+855"),
    ("la", "Laos", "+856"),
    ("bn", "Brunei", "+673"),
    ("tl", "Timor-Leste", "+670"),
    ("mn", "Mongolia", "+976"),
    ("sa", "Saudi Arabia", "+966"),
    ("ae", "United Arab Emirates", "+971"),
    ("qa", "Qatar", "+974"),
    ("kw", "Kuwait", "+965"),
    ("bh", "Bahrain", "+973"),
    ("om", "Oman", "+968"),
    ("ye", "Yemen", "+967"),
    ("jo", "Jordan", "+962"),
    ("lb", "Lebanon", "+961"),
    ("sy", "Syria", "+963"),
    ("iq", "Iraq", "+964"),
    ("ir", "Iran", "+98"),
    ("tr", "Turkey", "+90"),
    ("il", "Israel", "+972"),
    ("ps", "Palestine", "+970"),
    ("eg", "Egypt", "+20"),
    ("ly", "Libya", "+218"),
    ("tn", "Tunisia", "+216"),
    ("dz", "Algeria", "+213"),
    ("ma", "Morocco", "+212"),
    ("sd", "Sudan", "+249"),
    ("ss", "South Sudan", "+211"),
    ("et", "Ethiopia", "+251"),
    ("er", "Eritrea", "+291"),
    ("dj", "Djibouti", "+253"),
    ("so", "Somalia", "+252"),
    ("ke", "Kenya", "+254"),
    ("ug", "Uganda", "+256"),
    ("tz", "Tanzania", "+255"),
    ("rw", "Rwanda", "+250"),
    ("bi", "Burundi", "+257"),
    ("mw", "Malawi", "+265"),
    ("zm", "Zambia", "+260"),
    ("zw", "Zimbabwe", "+263"),
    ("bw", "Botswana", "+267"),
    ("na", "Namibia", "+264"),
    ("sz", "Eswatini", "+268"),
    ("ls", "Lesotho", "+266"),
    ("za", "South Africa", "+27"),
    ("mz", "Mozambique", "+258"),
    ("mg", "Madagascar", "+261"),
    ("mu", "Mauritius", "+230"),
    ("sc", "Seychelles", "+248"),
    ("km", "Comoros", "+269"),
    ("ng", "Nigeria", "+234"),
    ("gh", "Ghana", "+233"),
    ("ci", "Ivory Coast", "+225"),
    ("sn", "Senegal", "+221"),
    ("ml", "Mali", "+223"),
    ("bf", "Burkina Faso", "+226"),
    ("ne", "Niger", "+227"),
    ("td", "Chad", "+235"),
    ("cm", "Cameroon", "+237"),
    ("cf", "Central African Republic", "+236"),
    ("cg", "Republic of the Congo", "+242"),
    ("cd", "Democratic Republic of the Congo", "+243"),
    ("ga", "Gabon", "+241"),
    ("gq", "Equatorial Guinea", "+240"),
    ("st", "São Tomé and Príncipe", "+239"),
    ("ao", "Angola", "+244"),
    ("other", "Other", "+1"),
];

pub const EMPLOYMENT_STATUSES: &[(&str, &str)] = &[
    ("employed", "Currently Employed"),
    ("between-jobs", "In Between Jobs"),
    ("self-employed", "Self-Employed"),
];

pub const APPLICATION_SOURCES: &[(&str, &str)] = &[
    ("upwork", "Upwork"),
    ("linkedin", "LinkedIn"),
    ("facebook", "Facebook"),
    ("google", "Google Search"),
    ("wuzzuf", "Wuzzuf"),
    ("bayt", "Bayt.com"),
    ("referral", "Referral"),
];

pub const SERVICES: &[(&str, &str)] = &[
    ("phone-support", "Phone Customer Support"),
    ("chat-email-support", "Chat & Email Customer Support"),
    ("appointment-setting", "Appointment Setting"),
    ("cold-calling", "Cold Calling"),
    ("virtual-assistant", "Virtual Assistant"),
    ("lead-generation", "Lead Generation"),
];

pub const MONTHLY_BUDGETS: &[(&str, &str)] = &[
    ("under-1k", "Under $1,000/month"),
    ("1k-3k", "$1,000 - $3,000/month"),
    ("3k-5k", "$3,000 - $5,000/month"),
    ("5k-10k", "$5,000 - $10,000/month"),
    ("10k-20k", "$10,000 - $20,000/month"),
    ("20k-plus", "$20,000+/month"),
    ("discuss", "Let's discuss"),
];

pub const REFERRAL_CHANNELS: &[(&str, &str)] = &[
    ("google-search", "Google search"),
    ("clutch", "Clutch"),
    ("upwork", "Upwork"),
    ("linkedin", "LinkedIn"),
    ("referral", "Referral"),
    ("social-media", "Social Media"),
    ("other", "Other"),
];

pub fn choices(options: &[(&str, &str)]) -> Vec<Choice> {
    options
        .iter()
        .map(|(value, label)| Choice::new(*value, *label))
        .collect()
}

pub fn countries(countries: &[(&str, &str, &str)]) -> Vec<Choice> {
    countries
        .iter()
        .map(|(value, label, _)| Choice::new(*value, *label))
        .collect()
}

/// The distinct calling codes of `countries`, in order of first
/// appearance.
pub fn calling_codes(countries: &[(&str, &str, &str)]) -> Vec<Choice> {
    let mut codes: Vec<Choice> = vec![];

    for (_, label, code) in countries {
        match codes.iter_mut().find(|c| c.value == *code) {
            Some(existing) => {
                existing.label.push_str(", ");
                existing.label.push_str(label);
            }
            None => codes.push(Choice::new(*code, format!("{} {}", code, label))),
        }
    }

    codes
}

/// Each listed country with its calling code. `other` is left out so it
/// can be paired with any code.
pub fn country_calling_codes(countries: &[(&str, &str, &str)]) -> Vec<(String, String)> {
    countries
        .iter()
        .filter(|(value, _, _)| *value != "other")
        .map(|(value, _, code)| ((*value).to_owned(), (*code).to_owned()))
        .collect()
}
