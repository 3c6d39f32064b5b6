use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeBien {
    /// A single dwelling rented as a whole.
    CourUnique,
    /// A shared compound with individually rented sub-units ("maisons").
    CourCommune,
    /// A commercial unit.
    Magasin,
}

impl TypeBien {
    pub fn label(self) -> &'static str {
        match self {
            TypeBien::CourUnique => "cour unique",
            TypeBien::CourCommune => "cour commune",
            TypeBien::Magasin => "magasin",
        }
    }
}

/// A sub-unit of a `cour_commune`, with its own occupancy.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Maison {
    pub numero: String,
    #[serde(default)]
    pub occupee: bool,
    #[serde(default)]
    pub locataire_id: Option<String>,
}

/// A rental property ("bien").
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Bien {
    pub id: String,
    pub nom: String,
    pub type_bien: TypeBien,
    pub proprietaire_id: String,
    #[serde(default)]
    pub maisons: Vec<Maison>,
}
