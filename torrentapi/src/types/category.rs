//! Human-readable category names and their numeric ids.

/// Category names paired with the ids accepted by the `category` filter.
pub const CATEGORIES: [(&str, u32); 23] = [
    ("Movies/XVID", 14),
    ("Movies/XVID/720", 48),
    ("Movies/x264", 17),
    ("Movies/x264/1080", 44),
    ("Movies/x264/720", 45),
    ("Movies/x264/3D", 47),
    ("Movies/x264/4k", 50),
    ("Movies/x265/4k", 51),
    ("Movies/x265/4k/HDR", 52),
    ("Movies/Full BD", 42),
    ("Movies/BD Remux", 46),
    ("TV Episodes", 18),
    ("TV HD Episodes", 41),
    ("TV UHD Episodes", 49),
    ("Music/MP3", 23),
    ("Music/FLAC", 25),
    ("Games/PC ISO", 27),
    ("Games/PC RIP", 28),
    ("Games/PS3", 40),
    ("Games/PS4", 53),
    ("Games/XBOX-360", 32),
    ("Software/PC ISO", 33),
    ("XXX", 4),
];

/// Looks up a category id by name, ignoring ASCII case.
pub fn category_id(name: &str) -> Option<u32> {
    CATEGORIES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
        .map(|&(_, id)| id)
}

pub fn category_name(id: u32) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|&&(_, i)| i == id)
        .map(|&(n, _)| n)
}
