//! The default MTR network.

use super::{NetworkError, RailNetwork, RailNetworkBuilder};
use crate::domain::Coord;

const AEL: &[&str] = &["HOK", "KOW", "TSY", "AIR", "AWE"];
const TCL: &[&str] = &["HOK", "KOW", "OLY", "NAC", "LAK", "TSY", "SUN", "TUC"];
const TML: &[&str] = &[
    "WKS", "MOS", "HEO", "TSH", "SHM", "CIO", "STW", "CKT", "TAW", "HIK", "DIH", "KAT", "SUW",
    "TKW", "HOM", "HUH", "ETS", "AUS", "NAC", "MEF", "TWW", "KSR", "YUL", "LOP", "TIS", "SIH",
    "TUM",
];
const TKL: &[&str] = &["NOP", "QUB", "YAT", "TIK", "TKO", "LHP", "HAH", "POA"];
const EAL: &[&str] = &[
    "LOW", "SHS", "FAN", "TAP", "TWO", "UNI", "FOT", "SHT", "KOT", "HUH",
];
const SIL: &[&str] = &["ADM", "OCP", "WCH", "LET", "SOH"];
const TWL: &[&str] = &[
    "CEN", "ADM", "TST", "JOR", "YMT", "MOK", "PRE", "SSP", "CSW", "LCK", "MEF", "LAK", "KWF",
    "KWH", "TWH", "TSW",
];
const ISL: &[&str] = &[
    "KET", "HKU", "SYP", "SHW", "CEN", "ADM", "WAC", "CAB", "TIH", "FOH", "NOP", "QUB", "TAK",
    "SWH", "SKW", "HFC", "CHW",
];
const KTL: &[&str] = &[
    "WHA", "HOM", "YMT", "MOK", "PRE", "SKM", "KOT", "LOF", "WTS", "DIH", "CHH", "KOB", "NTK",
    "KWT", "LAT", "YAT", "TIK",
];

const INTERCHANGES: &[(&str, &[&str])] = &[
    ("ADM", &["ISL", "TWL", "SIL"]),
    ("NOP", &["TKL", "ISL"]),
    ("QUB", &["TKL", "ISL"]),
    ("HUH", &["TML", "EAL"]),
    ("MEF", &["TML", "TWL"]),
    ("YAT", &["KTL", "TKL"]),
    ("TIK", &["KTL", "TKL"]),
    ("KOT", &["EAL", "KTL"]),
    ("PRE", &["KTL", "TWL"]),
    ("LAK", &["TWL", "TCL"]),
    ("NAC", &["TCL", "TML"]),
    ("DIH", &["KTL", "TML"]),
    ("HOK", &["AEL", "TCL", "ISL", "TWL"]),
    ("CEN", &["ISL", "TWL", "AEL", "TCL"]),
    ("TSY", &["AEL", "TCL"]),
    ("KOW", &["AEL", "TCL"]),
];

// (code, English name, latitude, longitude)
const STATIONS: &[(&str, &str, f64, f64)] = &[
    ("HOK", "Hong Kong", 22.2848, 114.1582),
    ("KOW", "Kowloon", 22.3046, 114.1614),
    ("TSY", "Tsing Yi", 22.3592, 114.1088),
    ("AIR", "Airport", 22.3160, 113.9365),
    ("AWE", "AsiaWorld-Expo", 22.3208, 113.9418),
    ("OLY", "Olympic", 22.3178, 114.1600),
    ("NAC", "Nam Cheong", 22.3267, 114.1538),
    ("LAK", "Lai King", 22.3479, 114.1409),
    ("SUN", "Sunny Bay", 22.3328, 114.0289),
    ("TUC", "Tung Chung", 22.2890, 113.9461),
    ("WKS", "Wu Kai Sha", 22.4274, 114.2429),
    ("MOS", "Ma On Shan", 22.4166, 114.2268),
    ("HEO", "Heng On", 22.4092, 114.2216),
    ("TSH", "Tai Shui Hang", 22.4028, 114.2188),
    ("SHM", "Shek Mun", 22.3962, 114.2098),
    ("CIO", "City One", 22.3894, 114.2056),
    ("STW", "Sha Tin Wai", 22.3828, 114.1992),
    ("CKT", "Che Kung Temple", 22.3762, 114.1928),
    ("TAW", "Tai Wai", 22.3718, 114.1866),
    ("HIK", "Hin Keng", 22.3612, 114.1788),
    ("DIH", "Diamond Hill", 22.3408, 114.1938),
    ("KAT", "Kai Tak", 22.3256, 114.1892),
    ("SUW", "Sung Wong Toi", 22.3188, 114.1846),
    ("TKW", "To Kwa Wan", 22.3122, 114.1788),
    ("HOM", "Ho Man Tin", 22.3082, 114.1838),
    ("HUH", "Hung Hom", 22.3108, 114.1918),
    ("ETS", "East Tsim Sha Tsui", 22.2968, 114.1728),
    ("AUS", "Austin", 22.3034, 114.1578),
    ("MEF", "Mei Foo", 22.3378, 114.1478),
    ("TWW", "Tsuen Wan West", 22.3688, 114.1178),
    ("KSR", "Kam Sheung Road", 22.4178, 114.0978),
    ("YUL", "Yuen Long", 22.4468, 114.0378),
    ("LOP", "Long Ping", 22.4568, 114.0178),
    ("TIS", "Tin Shui Wai", 22.4668, 113.9978),
    ("SIH", "Siu Hong", 22.4768, 113.9778),
    ("TUM", "Tuen Mun", 22.4868, 113.9578),
    ("NOP", "North Point", 22.3168, 114.2098),
    ("QUB", "Quarry Bay", 22.3168, 114.2198),
    ("YAT", "Yau Tong", 22.2988, 114.2378),
    ("TIK", "Tiu Keng Leng", 22.2858, 114.2478),
    ("TKO", "Tseung Kwan O", 22.3058, 114.2578),
    ("LHP", "LOHAS Park", 22.2958, 114.2678),
    ("HAH", "Hang Hau", 22.3158, 114.2678),
    ("POA", "Po Lam", 22.3258, 114.2578),
    ("LOW", "Lo Wu", 22.5138, 114.1178),
    ("SHS", "Sheung Shui", 22.4938, 114.1378),
    ("FAN", "Fanling", 22.4738, 114.1478),
    ("TAP", "Tai Po Market", 22.4538, 114.1578),
    ("TWO", "Tai Wo", 22.4338, 114.1678),
    ("UNI", "University", 22.4138, 114.1778),
    ("FOT", "Fo Tan", 22.3938, 114.1878),
    ("SHT", "Sha Tin", 22.3738, 114.1978),
    ("KOT", "Kowloon Tong", 22.3538, 114.1878),
    ("ADM", "Admiralty", 22.2868, 114.1578),
    ("OCP", "Ocean Park", 22.2668, 114.1678),
    ("WCH", "Wong Chuk Hang", 22.2568, 114.1778),
    ("LET", "Lei Tung", 22.2468, 114.1878),
    ("SOH", "South Horizons", 22.2368, 114.1978),
    ("CEN", "Central", 22.2848, 114.1588),
    ("TST", "Tsim Sha Tsui", 22.2968, 114.1728),
    ("JOR", "Jordan", 22.3068, 114.1728),
    ("YMT", "Yau Ma Tei", 22.3125, 114.1706),
    ("MOK", "Mong Kok", 22.3197, 114.1694),
    ("PRE", "Prince Edward", 22.3268, 114.1689),
    ("SSP", "Sham Shui Po", 22.3368, 114.1678),
    ("CSW", "Cheung Sha Wan", 22.3468, 114.1668),
    ("LCK", "Lai Chi Kok", 22.3568, 114.1658),
    ("KWF", "Kwai Fong", 22.3668, 114.1378),
    ("KWH", "Kwai Hing", 22.3768, 114.1368),
    ("TWH", "Tai Wo Hau", 22.3868, 114.1358),
    ("TSW", "Tsuen Wan", 22.3968, 114.1348),
    ("KET", "Kennedy Town", 22.2868, 114.1378),
    ("HKU", "HKU", 22.2868, 114.1478),
    ("SYP", "Sai Ying Pun", 22.2868, 114.1578),
    ("SHW", "Sheung Wan", 22.2868, 114.1678),
    ("WAC", "Wan Chai", 22.2868, 114.1778),
    ("CAB", "Causeway Bay", 22.2868, 114.1878),
    ("TIH", "Tin Hau", 22.2868, 114.1978),
    ("FOH", "Fortress Hill", 22.2868, 114.2078),
    ("TAK", "Tai Koo", 22.3168, 114.2298),
    ("SWH", "Sai Wan Ho", 22.3168, 114.2398),
    ("SKW", "Shau Kei Wan", 22.3168, 114.2498),
    ("HFC", "Heng Fa Chuen", 22.3168, 114.2598),
    ("CHW", "Chai Wan", 22.3168, 114.2698),
    ("WHA", "Whampoa", 22.3042, 114.1869),
    ("SKM", "Shek Kip Mei", 22.3368, 114.1678),
    ("LOF", "Lok Fu", 22.3468, 114.1978),
    ("WTS", "Wong Tai Sin", 22.3368, 114.2078),
    ("CHH", "Choi Hung", 22.3268, 114.2178),
    ("KOB", "Kowloon Bay", 22.3168, 114.2278),
    ("NTK", "Ngau Tau Kok", 22.3068, 114.2378),
    ("KWT", "Kwun Tong", 22.3118, 114.2258),
    ("LAT", "Lam Tin", 22.2968, 114.2378),
];

/// Build the nine-line MTR heavy-rail network with station names and
/// coordinates.
pub fn mtr_network() -> Result<RailNetwork, NetworkError> {
    let mut builder = RailNetworkBuilder::new()
        .line("AEL", "Airport Express Line", AEL)
        .line("TCL", "Tung Chung Line", TCL)
        .line("TML", "Tuen Ma Line", TML)
        .line_with_terminals("TKL", "Tseung Kwan O Line", TKL, &["NOP"], &["POA", "LHP"])
        .line("EAL", "East Rail Line", EAL)
        .line("SIL", "South Island Line", SIL)
        .line("TWL", "Tsuen Wan Line", TWL)
        .line("ISL", "Island Line", ISL)
        .line("KTL", "Kwun Tong Line", KTL);

    for (station, lines) in INTERCHANGES {
        builder = builder.interchange(station, lines);
    }
    for &(code, name, lat, lon) in STATIONS {
        builder = builder.station(code, name, Coord::new(lat, lon));
    }

    builder.build()
}
