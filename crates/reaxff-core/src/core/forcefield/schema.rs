//! The fixed ReaxFF section vocabulary.
//!
//! Every section the loader understands is described by one [`SectionSchema`]
//! record in [`SCHEMAS`]. Arity, field layout, symmetry and wildcard rules are
//! data here, so the builder has a single code path for all sections.

use phf::{Map, phf_map};
use std::fmt;

/// The physical family a section belongs to. Used for diagnostics and to
/// group sections when writing a library back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Global,
    Element,
    Bond,
    Angle,
    HydrogenBond,
    Torsion,
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InteractionKind::Global => "global",
            InteractionKind::Element => "element",
            InteractionKind::Bond => "bond",
            InteractionKind::Angle => "angle",
            InteractionKind::HydrogenBond => "hydrogen bond",
            InteractionKind::Torsion => "torsion",
        };
        f.write_str(label)
    }
}

/// How a key's permutations relate to the same physical entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    /// The given order is the only order.
    Directional,
    /// The reversed tuple addresses the same entry (A-B == B-A, A-B-C == C-B-A).
    Reversible,
}

/// The energy unit declared by a header's unit token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnergyUnit {
    KcalPerMol,
    KjPerMol,
    ElectronVolt,
}

static UNIT_TOKENS: Map<&'static str, EnergyUnit> = phf_map! {
    "kcal" => EnergyUnit::KcalPerMol,
    "kjmol" => EnergyUnit::KjPerMol,
    "ev" => EnergyUnit::ElectronVolt,
};

impl EnergyUnit {
    /// Recognizes a header unit token, ignoring ASCII case.
    pub fn from_token(token: &str) -> Option<Self> {
        UNIT_TOKENS.get(token.to_ascii_lowercase().as_str()).copied()
    }

    pub fn token(self) -> &'static str {
        match self {
            EnergyUnit::KcalPerMol => "kcal",
            EnergyUnit::KjPerMol => "kjmol",
            EnergyUnit::ElectronVolt => "ev",
        }
    }

    /// Multiplicative factor converting one of this unit into eV.
    pub fn to_ev(self) -> f64 {
        match self {
            EnergyUnit::KcalPerMol => 0.043_364_104,
            EnergyUnit::KjPerMol => 0.010_364_272,
            EnergyUnit::ElectronVolt => 1.0,
        }
    }
}

/// Static description of one section layout.
#[derive(Debug, PartialEq)]
pub struct SectionSchema {
    pub name: &'static str,
    /// Schema-distinguishing header modifiers, sorted.
    pub modifiers: &'static [&'static str],
    pub kind: InteractionKind,
    pub arity: usize,
    /// One label per numeric column; the slice length is the exact field count.
    pub fields: &'static [&'static str],
    pub symmetry: Symmetry,
    /// Key positions in which the wildcard species may appear.
    pub wildcard_positions: &'static [usize],
    /// Lookup relaxations tried in order. Each rule lists the positions
    /// replaced by the wildcard; the empty rule is the exact key.
    pub relaxations: &'static [&'static [usize]],
}

impl SectionSchema {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_global(&self) -> bool {
        self.arity == 0
    }

    pub fn allows_wildcard_at(&self, position: usize) -> bool {
        self.wildcard_positions.contains(&position)
    }

    /// The header text this schema is written under, without unit token.
    pub fn header(&self) -> String {
        let mut header = self.name.to_string();
        for modifier in self.modifiers {
            header.push(' ');
            header.push_str(modifier);
        }
        header
    }
}

const EXACT: &[&[usize]] = &[&[]];
const TORSION_RELAXATIONS: &[&[usize]] = &[&[], &[0], &[3], &[0, 3]];

const BO_FIELDS: &[&str] = &["p_bo1", "p_bo2", "p_bo3", "p_bo4", "p_bo5", "p_bo6"];

macro_rules! schema {
    ($name:literal, [$($modifier:literal),*], $kind:ident, $arity:literal, [$($field:literal),+ $(,)?], $symmetry:ident) => {
        schema!($name, [$($modifier),*], $kind, $arity, &[$($field),+], $symmetry)
    };
    ($name:literal, [$($modifier:literal),*], $kind:ident, $arity:literal, $fields:expr, $symmetry:ident) => {
        SectionSchema {
            name: $name,
            modifiers: &[$($modifier),*],
            kind: InteractionKind::$kind,
            arity: $arity,
            fields: $fields,
            symmetry: Symmetry::$symmetry,
            wildcard_positions: &[],
            relaxations: EXACT,
        }
    };
}

/// The complete section registry, in the order sections are written out.
#[rustfmt::skip]
pub static SCHEMAS: &[SectionSchema] = &[
    // --- Global scalars ---
    schema!("reaxFFvdwcutoff", [], Global, 0, ["cutoff"], Directional),
    schema!("reaxFFqcutoff", [], Global, 0, ["cutoff"], Directional),
    schema!("reaxFFtol", [], Global, 0, ["bond_order", "angle_bond_order"], Directional),
    schema!("reaxff0_bond", [], Global, 0, ["p_boc1", "p_boc2"], Directional),
    schema!("reaxff0_over", [], Global, 0, ["p_ovun3", "p_ovun4", "p_ovun6", "p_ovun7", "p_ovun8"], Directional),
    schema!("reaxff0_valence", [], Global, 0, ["p_val6", "p_val8", "p_val9", "p_val10"], Directional),
    schema!("reaxff0_penalty", [], Global, 0, ["p_pen2", "p_pen3", "p_pen4"], Directional),
    schema!("reaxff0_torsion", [], Global, 0, ["p_tor2", "p_tor3", "p_tor4", "p_cot2"], Directional),
    schema!("reaxff0_vdw", [], Global, 0, ["p_vdw1"], Directional),
    schema!("reaxff0_lonepair", [], Global, 0, ["p_lp1"], Directional),

    // --- Per-element ---
    schema!("reaxff1_radii", [], Element, 1, ["r_sigma", "r_pi", "r_pipi"], Directional),
    schema!("reaxff1_valence", [], Element, 1, ["valence", "valence_boc", "valence_e", "valence_angle"], Directional),
    schema!("reaxff1_over", [], Element, 1, ["p_boc3", "p_boc4", "p_boc5", "p_ovun2"], Directional),
    schema!("reaxff1_under", [], Element, 1, ["p_ovun5"], Directional),
    schema!("reaxff1_lonepair", [], Element, 1, ["n_lp_opt", "p_lp2"], Directional),
    schema!("reaxff1_angle", [], Element, 1, ["p_val3", "p_val5"], Directional),
    schema!("reaxff1_morse", [], Element, 1, ["alpha", "epsilon", "r_vdw", "gamma_w"], Directional),
    schema!("reaxff_chi", [], Element, 1, ["chi"], Directional),
    schema!("reaxff_mu", [], Element, 1, ["mu"], Directional),
    schema!("reaxff_gamma", [], Element, 1, ["gamma"], Directional),

    // --- Bonds ---
    schema!("reaxff2_bo", ["bo13", "over"], Bond, 2, BO_FIELDS, Reversible),
    schema!("reaxff2_bo", ["over"], Bond, 2, BO_FIELDS, Reversible),
    schema!("reaxff2_bo", ["bo13"], Bond, 2, BO_FIELDS, Reversible),
    schema!("reaxff2_bo", [], Bond, 2, BO_FIELDS, Reversible),
    schema!("reaxff2_bond", [], Bond, 2, ["de_sigma", "de_pi", "de_pipi", "p_be1", "p_be2"], Reversible),
    schema!("reaxff2_over", [], Bond, 2, ["p_ovun1"], Reversible),
    schema!("reaxff2_pen", [], Bond, 2, ["p_pen1"], Reversible),
    schema!("reaxff2_morse", [], Bond, 2, ["d_ij", "alpha_ij", "r_vdw", "r_sigma", "r_pi", "r_pipi"], Reversible),

    // --- Angles and hydrogen bonds ---
    schema!("reaxff3_angle", [], Angle, 3, ["theta_00", "p_val1", "p_val2", "p_val4", "p_val7"], Reversible),
    schema!("reaxff3_penalty", [], Angle, 3, ["p_pen1"], Reversible),
    schema!("reaxff3_conjugation", [], Angle, 3, ["p_coa1", "p_coa2", "p_coa3", "p_coa4"], Reversible),
    schema!("reaxff3_hbond", [], HydrogenBond, 3, ["r_hb", "p_hb1", "p_hb2", "p_hb3"], Directional),

    // --- Torsions ---
    SectionSchema {
        name: "reaxff4_torsion",
        modifiers: &[],
        kind: InteractionKind::Torsion,
        arity: 4,
        fields: &["v1", "v2", "v3", "p_tor1", "p_cot1"],
        symmetry: Symmetry::Directional,
        wildcard_positions: &[0, 3],
        relaxations: TORSION_RELAXATIONS,
    },
];

/// A header's modifier tokens split into the unit and the schema-relevant rest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderModifiers {
    pub unit: Option<EnergyUnit>,
    pub schema: Vec<String>,
}

impl HeaderModifiers {
    pub fn classify<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut modifiers = Self::default();
        for token in tokens {
            let token = token.as_ref();
            match EnergyUnit::from_token(token) {
                Some(unit) => modifiers.unit = Some(unit),
                None => modifiers.schema.push(token.to_string()),
            }
        }
        modifiers.schema.sort_unstable();
        modifiers.schema.dedup();
        modifiers
    }
}

/// Finds the schema for a section name and its sorted schema modifiers.
pub fn resolve(name: &str, modifiers: &[String]) -> Option<&'static SectionSchema> {
    SCHEMAS.iter().find(|schema| {
        schema.name == name
            && schema.modifiers.len() == modifiers.len()
            && schema.modifiers.iter().zip(modifiers).all(|(a, b)| *a == b)
    })
}

/// True if `token` names a section of the vocabulary, or looks like one.
///
/// Unregistered names with a ReaxFF prefix still open a section so that the
/// builder can report them as unknown instead of reading them as data.
pub fn is_header_token(token: &str) -> bool {
    const EXACT_HEADERS: [&str; 3] = ["reaxFFvdwcutoff", "reaxFFqcutoff", "reaxFFtol"];
    const PREFIXES: [&str; 6] = [
        "reaxff0_", "reaxff1_", "reaxff2_", "reaxff3_", "reaxff4_", "reaxff_",
    ];
    EXACT_HEADERS.contains(&token) || PREFIXES.iter().any(|prefix| token.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn mods(tokens: &[&str]) -> Vec<String> {
        HeaderModifiers::classify(tokens).schema
    }

    #[test]
    fn registry_has_no_duplicate_name_modifier_pairs() {
        let mut seen = HashSet::new();
        for schema in SCHEMAS {
            assert!(
                seen.insert((schema.name, schema.modifiers)),
                "duplicate schema {}",
                schema.header()
            );
        }
    }

    #[test]
    fn registry_modifiers_are_sorted() {
        for schema in SCHEMAS {
            let mut sorted = schema.modifiers.to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, schema.modifiers, "{}", schema.name);
        }
    }

    #[test]
    fn registry_wildcards_and_relaxations_fit_arity() {
        for schema in SCHEMAS {
            assert!(!schema.fields.is_empty());
            assert!(schema.arity <= 4);
            assert!(schema.wildcard_positions.iter().all(|&p| p < schema.arity));
            assert_eq!(schema.relaxations.first(), Some(&(&[] as &[usize])));
            for rule in schema.relaxations {
                assert!(rule.iter().all(|p| schema.allows_wildcard_at(*p)));
            }
        }
    }

    #[test]
    fn variants_sharing_a_name_share_layout() {
        for a in SCHEMAS {
            for b in SCHEMAS.iter().filter(|b| b.name == a.name) {
                assert_eq!(a.arity, b.arity);
                assert_eq!(a.fields, b.fields);
                assert_eq!(a.kind, b.kind);
            }
        }
    }

    #[test]
    fn resolve_finds_plain_sections() {
        let schema = resolve("reaxff1_radii", &[]).unwrap();
        assert_eq!(schema.arity, 1);
        assert_eq!(schema.field_count(), 3);
        assert!(resolve("reaxff1_radii", &["over".to_string()]).is_none());
    }

    #[test]
    fn resolve_distinguishes_bond_order_variants() {
        let both = resolve("reaxff2_bo", &mods(&["over", "bo13"])).unwrap();
        let bo13 = resolve("reaxff2_bo", &mods(&["bo13"])).unwrap();
        let plain = resolve("reaxff2_bo", &mods(&[])).unwrap();
        assert_eq!(both.modifiers, &["bo13", "over"]);
        assert_eq!(bo13.modifiers, &["bo13"]);
        assert!(plain.modifiers.is_empty());
        assert!(!std::ptr::eq(both, bo13));
    }

    #[test]
    fn resolve_unknown_name_is_none() {
        assert!(resolve("reaxff2_nonsense", &[]).is_none());
        assert!(resolve("reaxff9_bond", &[]).is_none());
    }

    #[test]
    fn classify_separates_unit_from_schema_modifiers() {
        let classified = HeaderModifiers::classify(&["over", "kcal", "bo13"]);
        assert_eq!(classified.unit, Some(EnergyUnit::KcalPerMol));
        assert_eq!(classified.schema, vec!["bo13", "over"]);

        let upper = HeaderModifiers::classify(&["KCAL"]);
        assert_eq!(upper.unit, Some(EnergyUnit::KcalPerMol));
        assert!(upper.schema.is_empty());
    }

    #[test]
    fn torsion_schema_allows_outer_wildcards_only() {
        let torsion = resolve("reaxff4_torsion", &[]).unwrap();
        assert!(torsion.allows_wildcard_at(0));
        assert!(torsion.allows_wildcard_at(3));
        assert!(!torsion.allows_wildcard_at(1));
        assert!(!torsion.allows_wildcard_at(2));
    }

    #[test]
    fn is_header_token_covers_vocabulary() {
        assert!(is_header_token("reaxFFvdwcutoff"));
        assert!(is_header_token("reaxFFqcutoff"));
        assert!(is_header_token("reaxFFtol"));
        assert!(is_header_token("reaxff0_bond"));
        assert!(is_header_token("reaxff4_torsion"));
        assert!(is_header_token("reaxff_chi"));
        assert!(is_header_token("reaxff2_unknown"));
        assert!(!is_header_token("C"));
        assert!(!is_header_token("reaxFFcutoff"));
        assert!(!is_header_token("10.0"));
    }

    #[test]
    fn header_joins_modifiers() {
        assert_eq!(
            resolve("reaxff2_bo", &mods(&["over", "bo13"])).unwrap().header(),
            "reaxff2_bo bo13 over"
        );
        assert_eq!(resolve("reaxff2_bond", &[]).unwrap().header(), "reaxff2_bond");
    }

    #[test]
    fn kcal_converts_to_ev() {
        assert!((EnergyUnit::KcalPerMol.to_ev() - 0.0433641).abs() < 1e-6);
        assert_eq!(EnergyUnit::ElectronVolt.to_ev(), 1.0);
        assert_eq!(EnergyUnit::from_token("kjmol"), Some(EnergyUnit::KjPerMol));
        assert_eq!(EnergyUnit::from_token("bo13"), None);
    }
}
