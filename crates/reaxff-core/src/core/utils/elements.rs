use phf::{Map, Set, phf_map, phf_set};

#[rustfmt::skip]
static ELEMENT_SYMBOLS: Set<&'static str> = phf_set! {
    "H", "He",
    "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe",
    "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy",
    "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt",
    "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
    "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf",
    "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
};

/// Site type tags GULP allows after a species symbol. Only `core` is a valid
/// ReaxFF site; the others are recognized so they can be rejected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteType {
    Core,
    Shell,
    BreathingCore,
    BreathingShell,
}

static SITE_TYPE_TAGS: Map<&'static str, SiteType> = phf_map! {
    "core" => SiteType::Core,
    "shel" => SiteType::Shell,
    "bcor" => SiteType::BreathingCore,
    "bshe" => SiteType::BreathingShell,
};

/// Returns the interned periodic-table symbol matching `symbol` exactly.
///
/// Matching is case-sensitive: `"Si"` is silicon, `"SI"` and `"si"` are not
/// element symbols.
pub fn interned_element(symbol: &str) -> Option<&'static str> {
    ELEMENT_SYMBOLS.get_key(symbol).copied()
}

pub fn is_element(symbol: &str) -> bool {
    ELEMENT_SYMBOLS.contains(symbol)
}

pub fn site_type(tag: &str) -> Option<SiteType> {
    SITE_TYPE_TAGS.get(tag).copied()
}

impl SiteType {
    pub fn tag(self) -> &'static str {
        match self {
            SiteType::Core => "core",
            SiteType::Shell => "shel",
            SiteType::BreathingCore => "bcor",
            SiteType::BreathingShell => "bshe",
        }
    }
}
