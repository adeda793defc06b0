//! Static reference data for BIST companies
//!
//! Display names and sectors are not available from the chart API, so the
//! gateway keeps its own table. The same table defines the symbol universe
//! ranked for gainers and losers and seeds search.

/// One listed company
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Company {
    pub symbol: &'static str,
    pub name: &'static str,
    pub sector: &'static str,
    /// Corporate web domain, used for logo lookup
    pub domain: Option<&'static str>,
}

const fn company(
    symbol: &'static str,
    name: &'static str,
    sector: &'static str,
    domain: Option<&'static str>,
) -> Company {
    Company {
        symbol,
        name,
        sector,
        domain,
    }
}

/// Symbols served for the `popular` listing unless configured otherwise
pub const DEFAULT_POPULAR: &[&str] = &[
    "THYAO", "GARAN", "AKBNK", "ASELS", "EREGL", "KCHOL", "SAHOL", "BIMAS", "TUPRS", "SISE",
];

#[rustfmt::skip]
pub static COMPANIES: &[Company] = &[
    // Banking
    company("GARAN", "Garanti BBVA", "Banking", Some("garantibbva.com.tr")),
    company("AKBNK", "Akbank", "Banking", Some("akbank.com")),
    company("ISCTR", "Türkiye İş Bankası", "Banking", Some("isbank.com.tr")),
    company("HALKB", "Türkiye Halk Bankası", "Banking", Some("halkbank.com.tr")),
    company("VAKBN", "Türkiye Vakıflar Bankası", "Banking", Some("vakifbank.com.tr")),
    company("YKBNK", "Yapı ve Kredi Bankası", "Banking", Some("yapikredi.com.tr")),
    company("QNBFB", "QNB Finansbank", "Banking", Some("qnb.com.tr")),
    company("ALBRK", "Albaraka Türk", "Banking", Some("albaraka.com.tr")),
    company("SKBNK", "Şekerbank", "Banking", Some("sekerbankasi.com.tr")),
    // Holdings
    company("SAHOL", "Hacı Ömer Sabancı Holding", "Holding", Some("sabanci.com")),
    company("KCHOL", "Koç Holding", "Holding", Some("koc.com.tr")),
    company("DOHOL", "Doğan Holding", "Holding", Some("dogusholding.com.tr")),
    company("AGHOL", "Anadolu Grubu Holding", "Holding", Some("anadolugrubu.com.tr")),
    // Aviation and transport
    company("THYAO", "Türk Hava Yolları", "Aviation", Some("turkishairlines.com")),
    company("PGSUS", "Pegasus Hava Taşımacılığı", "Aviation", Some("flypgs.com")),
    company("TAVHL", "TAV Havalimanları", "Aviation", Some("tav.aero")),
    // Technology and telecom
    company("TCELL", "Turkcell", "Telecommunications", Some("turkcell.com.tr")),
    company("TTKOM", "Türk Telekom", "Telecommunications", Some("turktelekom.com.tr")),
    company("ASELS", "Aselsan", "Defense", Some("aselsan.com.tr")),
    company("LOGO", "Logo Yazılım", "Technology", Some("logo.com.tr")),
    company("NETAS", "Netaş Telekomünikasyon", "Technology", Some("netas.com.tr")),
    // Retail and food
    company("BIMAS", "BİM Birleşik Mağazalar", "Retail", Some("bim.com.tr")),
    company("MGROS", "Migros Ticaret", "Retail", Some("migros.com.tr")),
    company("SOKM", "Şok Marketler", "Retail", Some("sokmarket.com.tr")),
    company("ULKER", "Ülker Bisküvi", "Food", Some("ulker.com.tr")),
    company("AEFES", "Anadolu Efes", "Beverages", Some("anadoluefes.com")),
    company("CCOLA", "Coca-Cola İçecek", "Beverages", Some("coca-colaturkiye.com")),
    company("KNFRT", "Konfrut Gıda", "Food", Some("konfrut.com.tr")),
    // Energy
    company("TUPRS", "Tüpraş", "Energy", Some("tupras.com.tr")),
    company("PETKM", "Petkim Petrokimya", "Chemicals", Some("petkim.com.tr")),
    company("AKSEN", "Aksa Enerji", "Energy", Some("akenerji.com.tr")),
    company("AKENR", "Akenerji", "Energy", Some("akenerji.com.tr")),
    company("ZOREN", "Zorlu Enerji", "Energy", Some("zorluenerji.com.tr")),
    // Automotive
    company("TOASO", "Tofaş Türk Otomobil", "Automotive", Some("tofas.com.tr")),
    company("FROTO", "Ford Otosan", "Automotive", Some("ford.com.tr")),
    company("OTKAR", "Otokar", "Automotive", Some("otokar.com.tr")),
    company("TTRAK", "Türk Traktör", "Automotive", Some("tmrtrk.com")),
    // Steel and construction
    company("EREGL", "Ereğli Demir Çelik", "Steel", Some("erdemir.com.tr")),
    company("KRDMD", "Kardemir", "Steel", Some("kardemir.com")),
    company("ENKAI", "Enka İnşaat", "Construction", Some("enka.com")),
    company("ANACM", "Anadolu Cam", "Glass", Some("anadolucam.com.tr")),
    company("OYAKC", "Oyak Çimento", "Cement", Some("oyakcement.com.tr")),
    // Appliances and electronics
    company("ARCLK", "Arçelik", "Appliances", Some("arcelik.com")),
    company("VESTL", "Vestel Elektronik", "Appliances", Some("vestel.com.tr")),
    company("BSHB", "BSH Ev Aletleri", "Appliances", Some("bsh-group.com")),
    // Glass and chemicals
    company("SISE", "Türkiye Şişe ve Cam", "Glass", Some("sisecam.com.tr")),
    company("SODA", "Soda Sanayii", "Chemicals", Some("sisecam.com.tr")),
    company("BRSAN", "Borusan Boru", "Steel", Some("borusan.com")),
    // Real estate
    company("EKGYO", "Emlak Konut GYO", "Real Estate", Some("emlakkonut.com.tr")),
    company("ISGYO", "İş GYO", "Real Estate", Some("isgyo.com.tr")),
    company("TRGYO", "Torunlar GYO", "Real Estate", Some("torunlargyo.com.tr")),
    // Other
    company("KOZAL", "Koza Altın", "Mining", Some("koza.com.tr")),
    company("KOZAA", "Koza Anadolu Metal", "Mining", Some("koza.com.tr")),
    company("IPEKE", "İpek Doğal Enerji", "Mining", Some("ipek.com.tr")),
    company("DOAS", "Doğuş Otomotiv", "Automotive", Some("doas.com.tr")),
];

/// Look up a company by ticker (case-insensitive)
pub fn find(symbol: &str) -> Option<&'static Company> {
    let symbol = symbol.trim();
    COMPANIES
        .iter()
        .find(|c| c.symbol.eq_ignore_ascii_case(symbol))
}

/// Display name for `symbol`, the symbol itself when unknown
pub fn display_name(symbol: &str) -> String {
    find(symbol).map_or_else(|| symbol.to_string(), |c| c.name.to_string())
}

/// Every ticker in the table
pub fn symbols() -> impl Iterator<Item = &'static str> {
    COMPANIES.iter().map(|c| c.symbol)
}

/// Companies whose ticker or name contains `query`
///
/// Matching folds Turkish letters to their ASCII upper-case base, so `"isbank"`
/// finds "Türkiye İş Bankası" and `"sise"` finds "Şişe".
pub fn search(query: &str) -> impl Iterator<Item = &'static Company> {
    let needle = fold(query.trim());
    COMPANIES.iter().filter(move |c| {
        !needle.is_empty() && (fold(c.symbol).contains(&needle) || fold(c.name).contains(&needle))
    })
}

fn fold(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            'ı' | 'i' | 'İ' | 'I' => Some('I'),
            'ş' | 'Ş' => Some('S'),
            'ğ' | 'Ğ' => Some('G'),
            'ü' | 'Ü' => Some('U'),
            'ö' | 'Ö' => Some('O'),
            'ç' | 'Ç' => Some('C'),
            c if c.is_whitespace() => None,
            c => Some(c.to_ascii_uppercase()),
        })
        .collect()
}
