//! Bundled Indian equity dataset
//!
//! Symbols are NSE tickers. Group tables may name tickers outside the
//! catalog; those are filtered out where groups are listed.

/// Supported tickers, in catalog order
pub const SUPPORTED_STOCKS: &[&str] = &[
    // Major Blue Chips
    "RELIANCE", "TCS", "INFY", "HDFC", "HDFCBANK", "ICICIBANK", "KOTAKBANK",
    "LT", "SBIN", "BHARTIARTL", "ITC", "BAJFINANCE", "ASIANPAINT", "HCLTECH",
    "AXISBANK", "MARUTI", "TITAN", "NESTLEIND", "ULTRACEMCO", "SUNPHARMA",
    "WIPRO", "TATAMOTORS", "TATASTEEL", "TECHM", "POWERGRID", "NTPC", "ONGC",
    "COALINDIA", "GRASIM", "JSWSTEEL", "HINDALCO", "DRREDDY", "CIPLA",
    "BRITANNIA", "DIVISLAB", "BAJAJFINSV", "EICHERMOT", "HEROMOTOCO",
    "BAJAJ-AUTO", "SHREECEM", "INDUSINDBK", "ADANIENT", "ADANIPORTS",
    "BPCL", "IOC", "HINDUNILVR", "TATACONSUM", "SWIGGY", "ZOMATO", "NYKAA", "PAYTM",

    // IT & Technology (Extended)
    "MINDTREE", "MPHASIS", "LTTS", "PERSISTENT", "COFORGE", "CYIENT",
    "RAMSONS", "INTELLECT", "KPITTECH", "SONATSOFTW", "NIITTECH", "HAPPIESTMINDS",
    "ROUTE", "NEWGEN", "AFFLE", "JUSTDIAL", "INDIAMART", "FRESHWORKS",

    // Banking & Financial (Extended)
    "FEDERALBNK", "IDFC", "IDFCFIRSTB", "BANDHANBNK", "RBLBANK", "YESBANK",
    "PNB", "BANKBARODA", "CANFINHOME", "LICHSGFIN", "HDFCLIFE",
    "ICICIPRULI", "SBILIFE", "STAR", "POLICYBZR", "ANGELONE", "CDSL", "CAMS",

    // Pharmaceuticals (Extended)
    "LUPIN", "BIOCON", "TORNTPHARM", "CADILAHC", "ZYDUSLIFE", "MANKIND", "ALKEM",
    "GLENMARK", "AUROPHARMA", "ABBOTINDIA", "PFIZER", "GSK", "NOVARTIS", "GLAXO",

    // Consumer & FMCG (Extended)
    "DABUR", "GODREJCP", "MARICO", "COLPAL", "EMAMI", "VBL", "JUBLFOOD",
    "PAGEIND", "TRENT", "SHOPERSTOP", "RAYMOND", "ADITYADIREC", "BATAINDIA",

    // Auto & Components (Extended)
    "MAHINDRA", "ESCORTS", "MRF", "APOLLOTYRE", "CEAT", "BOSCHLTD", "MOTHERSUMI",
    "ASHOKLEY", "BALKRISIND", "RELAXO", "EXIDEIND", "AMARARAJA",

    // Metals & Mining (Extended)
    "VEDL", "HINDZINC", "NMDC", "MOIL", "NATIONALUM", "TATAMTRDVR", "JINDALSTEL",
    "WELCORP", "RATNAMANI", "APL", "TIINDIA", "SAIL",

    // Energy & Utilities (Extended)
    "GAIL", "RELINFRA", "RPOWER", "ADANIGREEN", "ADANIPOWER", "SUZLON", "THERMAX",
    "BHEL", "SIEMENS", "ABB", "SCHNEIDER", "TATAPOWER", "CESC",

    // Cement & Construction (Extended)
    "AMBUJACEM", "ACC", "JKCEMENT", "HEIDELBERGCEM", "RAMCOCEM", "IRCON", "NBCC",
    "RITES", "BEML", "HCC", "PRISM", "KNR",

    // Chemicals (Extended)
    "UPL", "PIDILITIND", "BERGEPAINT", "AKZONOBEL", "TATACHEM", "GHCL",
    "DCMSHRIRAM", "DEEPAKNTR", "BALRAMCHIN", "VINATIORG", "CLEAN", "ROSSARI",

    // Real Estate & Construction
    "DLF", "GODREJPROP", "OBEROIRLTY", "PRESTIGE", "BRIGADE", "SOBHA",

    // Media & Entertainment
    "ZEEL", "SUNTV", "PVRINOX", "INOXLEISUR", "NAZARA", "TIPS", "SAREGRAMA",

    // Logistics & Transportation
    "DELHIVERY", "MAHLOG", "GATI", "ALLCARGO", "CONTAINERSHIPLN", "SHREYAS", "TCI",

    // Consumer Electronics & Appliances
    "DIXON", "AMBER", "WHIRLPOOL", "CROMPTON", "HAVELLS", "ORIENTELEC",
    "VOLTAS", "BLUESTARCO", "CARRIER",

    // Textiles & Apparel
    "ARVIND", "WELSPUNIND", "TRIDENT", "VARDHMAN", "PAGEINDUSTRIES",

    // Food & Beverages
    "BIKAJI", "DEVYANI", "WESTLIFE", "SAPPHIRE", "VARUN", "KRBL",

    // Gems & Jewellery
    "KALYANJEWELL", "PCJEWELLER", "RAJESHEXPO", "THANGAMAYIL",

    // Agriculture & Allied
    "RALLIS", "INSECTICIDES", "ZUARI", "COROMANDEL", "KRIBHCO", "JKPAPER",

    // Recent IPOs & Unicorns
    "IRCTC", "CARTRADE", "EASEMYTRIP", "RATEGAIN", "LATENTVIEW", "MOBIKWIK",
    "OLAELECTRIC", "BROOKFIELD", "EMBASSY", "NEXUS", "CHEMCON", "BURGERKING",
    "HERANBA", "GLAND", "METROPOLIS", "LAXMIMACHINE", "SHRIRAMFIN", "MAHLIFE",
    "EDELWEISS", "MOTILALOF", "KFINTECH", "BSE", "MCX",
];

/// Alternate spellings mapped to their canonical ticker
pub const STOCK_ALIASES: &[(&str, &str)] = &[
    ("RELIANCEIND", "RELIANCE"),
    ("RIL", "RELIANCE"),
    ("TATACONSULTANCY", "TCS"),
    ("TATACONS", "TCS"),
    ("INFOSYS", "INFY"),
    ("LARSENTOUBRO", "LT"),
    ("LNT", "LT"),
    ("BHARTIAIRTEL", "BHARTIARTL"),
    ("AIRTEL", "BHARTIARTL"),
    ("MARUTISUZUKI", "MARUTI"),
    ("ASIANPAINTS", "ASIANPAINT"),
    ("HCL", "HCLTECH"),
    ("TAMO", "TATAMOTORS"),
    ("SBIBANK", "SBIN"),
    ("STATEBANK", "SBIN"),
    ("KOTAKMAHINDRA", "KOTAKBANK"),
    ("KOTAK", "KOTAKBANK"),
    ("DRREDDYS", "DRREDDY"),
    ("REDDY", "DRREDDY"),
    ("NESTLEINDIA", "NESTLEIND"),
    ("NESTLE", "NESTLEIND"),
    ("HINDUSTAN", "HINDUNILVR"),
    ("HUL", "HINDUNILVR"),
    ("UNILEVER", "HINDUNILVR"),
    ("ITCLTD", "ITC"),
    ("PAYTMONEY", "PAYTM"),
    ("FSNNYKAA", "NYKAA"),
    ("SWIGGYLIMITED", "SWIGGY"),
    ("ZOMATOLTD", "ZOMATO"),
    ("POLICYBAZAAR", "POLICYBZR"),
    ("ANGELBROKING", "ANGELONE"),
];

/// Industry keyword groups used by search, checked in order
pub const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "BANKING",
        &[
            "HDFCBANK", "ICICIBANK", "SBIN", "AXISBANK", "KOTAKBANK", "INDUSINDBK", "FEDERALBNK",
            "YESBANK", "RBLBANK", "BANDHANBNK",
        ],
    ),
    (
        "IT",
        &[
            "TCS", "INFY", "WIPRO", "HCLTECH", "TECHM", "MINDTREE", "MPHASIS", "LTTS",
            "PERSISTENT", "COFORGE",
        ],
    ),
    (
        "PHARMA",
        &[
            "SUNPHARMA", "DRREDDY", "CIPLA", "LUPIN", "BIOCON", "TORNTPHARM", "CADILAHC",
            "ZYDUSLIFE", "AUROPHARMA", "GLENMARK",
        ],
    ),
    (
        "AUTO",
        &[
            "MARUTI", "TATAMOTORS", "MAHINDRA", "BAJAJ-AUTO", "HEROMOTOCO", "EICHERMOT",
            "ASHOKLEY", "ESCORTS", "MRF", "APOLLOTYRE",
        ],
    ),
    (
        "FMCG",
        &[
            "HINDUNILVR", "ITC", "NESTLEIND", "BRITANNIA", "DABUR", "MARICO", "GODREJCP", "EMAMI",
            "COLPAL", "VBL",
        ],
    ),
    (
        "ENERGY",
        &[
            "RELIANCE", "ONGC", "IOC", "BPCL", "GAIL", "NTPC", "POWERGRID", "COALINDIA",
            "ADANIGREEN", "ADANIPOWER",
        ],
    ),
    (
        "METALS",
        &[
            "TATASTEEL", "JSWSTEEL", "HINDALCO", "VEDL", "HINDZINC", "COALINDIA", "NMDC", "SAIL",
            "NATIONALUM", "JINDALSTEL",
        ],
    ),
];

pub const BANKING: &[&str] = &[
    "HDFCBANK", "ICICIBANK", "SBIN", "AXISBANK", "KOTAKBANK", "INDUSINDBK", "FEDERALBNK",
    "YESBANK", "RBLBANK", "BANDHANBNK", "PNB", "BANKBARODA", "IDFCFIRSTB", "IDFC",
];

pub const IT: &[&str] = &[
    "TCS", "INFY", "HCLTECH", "WIPRO", "TECHM", "MINDTREE", "MPHASIS", "LTTS", "PERSISTENT",
    "COFORGE", "CYIENT", "INTELLECT", "KPITTECH", "SONATSOFTW", "HAPPIESTMINDS", "NEWGEN",
];

pub const PHARMA: &[&str] = &[
    "SUNPHARMA", "DRREDDY", "CIPLA", "DIVISLAB", "LUPIN", "BIOCON", "TORNTPHARM", "CADILAHC",
    "ZYDUSLIFE", "MANKIND", "ALKEM", "GLENMARK", "AUROPHARMA", "ABBOTINDIA", "PFIZER",
];

pub const AUTO: &[&str] = &[
    "MARUTI", "TATAMOTORS", "MAHINDRA", "BAJAJ-AUTO", "EICHERMOT", "HEROMOTOCO", "ESCORTS",
    "ASHOKLEY", "MRF", "APOLLOTYRE", "CEAT", "BOSCHLTD", "MOTHERSUMI", "EXIDEIND", "AMARARAJA",
];

// HINDUUNILVR is not a listed ticker and drops out when filtered
pub const FMCG: &[&str] = &[
    "HINDUUNILVR", "ITC", "BRITANNIA", "NESTLEIND", "DABUR", "GODREJCP", "MARICO", "COLPAL",
    "EMAMI", "VBL", "TATACONSUM",
];

pub const ENERGY: &[&str] = &[
    "RELIANCE", "ONGC", "BPCL", "IOC", "POWERGRID", "NTPC", "COALINDIA", "TATAPOWER",
    "ADANIGREEN", "ADANIENT",
];

pub const METALS: &[&str] = &[
    "TATASTEEL", "JSWSTEEL", "HINDALCO", "VEDL", "HINDZINC", "NMDC", "JINDALSTEL", "SAIL",
    "NATIONALUM", "WELCORP", "RATNAMANI",
];

pub const TELECOM: &[&str] = &["BHARTIARTL", "JIOTELECOM", "VODAIDEACELL"];

pub const FINANCIAL: &[&str] = &[
    "BAJFINANCE", "BAJAJFINSV", "HDFCLIFE", "ICICIPRULI", "SBILIFE", "LICHSGFIN", "CANFINHOME",
    "STAR", "ANGELONE", "CDSL", "CAMS",
];

pub const LARGE_CAP: &[&str] = &[
    "RELIANCE", "TCS", "INFY", "HDFC", "HDFCBANK", "ICICIBANK", "KOTAKBANK", "LT", "SBIN",
    "BHARTIARTL", "ITC", "BAJFINANCE", "ASIANPAINT", "HCLTECH", "AXISBANK", "MARUTI", "TITAN",
    "NESTLEIND", "ULTRACEMCO", "SUNPHARMA", "WIPRO", "TATAMOTORS", "TATASTEEL", "TECHM",
    "POWERGRID", "NTPC", "ONGC", "COALINDIA", "HINDALCO", "DRREDDY", "CIPLA", "BRITANNIA",
    "BAJAJFINSV", "EICHERMOT", "HEROMOTOCO", "BAJAJ-AUTO", "ADANIENT",
];

pub const MID_CAP: &[&str] = &[
    "INDUSINDBK", "FEDERALBNK", "YESBANK", "BANDHANBNK", "LUPIN", "BIOCON", "TORNTPHARM",
    "MAHINDRA", "ESCORTS", "DABUR", "GODREJCP", "MARICO", "MINDTREE", "MPHASIS", "LTTS",
    "PERSISTENT", "COFORGE", "VEDL", "JSWSTEEL", "HINDZINC", "NMDC", "BPCL", "IOC", "TATAPOWER",
];

pub const SMALL_CAP: &[&str] = &[
    "RBLBANK", "PNB", "BANKBARODA", "CADILAHC", "ZYDUSLIFE", "MANKIND", "ALKEM", "GLENMARK",
    "AUROPHARMA", "CEAT", "BOSCHLTD", "MOTHERSUMI", "ASHOKLEY", "EXIDEIND", "AMARARAJA", "COLPAL",
    "EMAMI", "VBL", "CYIENT", "INTELLECT", "KPITTECH", "SONATSOFTW", "HAPPIESTMINDS",
];
