//! Flat form model for the five-step assessment wizard.
//!
//! [`FormState`] is the shape the input components bind to: one flat struct
//! covering identification/anamnesis, psychosocial needs, psychobiological
//! needs, housing conditions and vital measures. Enumerated fields use small
//! coded enums rather than free strings; each enum carries its fixed
//! label ⇄ code lookup table via `label`/`from_label` (the serde
//! representation is the short code used by the form widgets).
//!
//! Conventions:
//! - Text fields are `String`, with `""` meaning "not entered".
//! - Numeric fields are `Option`-al so "not entered" stays distinct from an
//!   entered zero.
//! - Boolean-like coded fields default to [`YesNo::Nao`].
//!
//! Serde names follow the form's original flat field keys so draft data
//! persisted by earlier clients keeps deserialising.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Coded yes/no answer used by select-like inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(rename = "sim")]
    Sim,
    #[default]
    #[serde(rename = "nao")]
    Nao,
}

impl YesNo {
    pub fn from_bool(value: bool) -> Self {
        if value {
            YesNo::Sim
        } else {
            YesNo::Nao
        }
    }

    pub fn is_yes(self) -> bool {
        matches!(self, YesNo::Sim)
    }
}

/// Who provided the anamnesis information.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InformantKind {
    #[serde(rename = "paciente")]
    Paciente,
    #[serde(rename = "membro_familia")]
    MembroFamilia,
    #[serde(rename = "amigo")]
    Amigo,
    #[serde(rename = "outros")]
    Outros,
}

impl InformantKind {
    pub fn label(self) -> &'static str {
        match self {
            InformantKind::Paciente => "Paciente",
            InformantKind::MembroFamilia => "Membro da Família",
            InformantKind::Amigo => "Amigo",
            InformantKind::Outros => "Outros",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Paciente" => Some(InformantKind::Paciente),
            "Membro da Família" => Some(InformantKind::MembroFamilia),
            "Amigo" => Some(InformantKind::Amigo),
            "Outros" => Some(InformantKind::Outros),
            _ => None,
        }
    }
}

/// Alcohol consumption frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrinkingFrequency {
    #[serde(rename = "social")]
    Social,
    #[serde(rename = "todos_os_dias")]
    TodosOsDias,
    #[serde(rename = "3x_semana")]
    TresPorSemana,
    #[serde(rename = ">3x_semana")]
    MaisDeTresPorSemana,
}

impl DrinkingFrequency {
    pub fn label(self) -> &'static str {
        match self {
            DrinkingFrequency::Social => "Social",
            DrinkingFrequency::TodosOsDias => "Todos os dias",
            DrinkingFrequency::TresPorSemana => "Três vezes por semana",
            DrinkingFrequency::MaisDeTresPorSemana => "Mais que três vezes por semana",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Social" => Some(DrinkingFrequency::Social),
            "Todos os dias" => Some(DrinkingFrequency::TodosOsDias),
            "Três vezes por semana" => Some(DrinkingFrequency::TresPorSemana),
            "Mais que três vezes por semana" => Some(DrinkingFrequency::MaisDeTresPorSemana),
            _ => None,
        }
    }
}

/// Sleep/rest satisfaction as reported by the patient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepSatisfaction {
    #[serde(rename = "satisfeito")]
    Satisfeito,
    #[serde(rename = "insatisfeito")]
    Insatisfeito,
}

impl SleepSatisfaction {
    pub fn label(self) -> &'static str {
        match self {
            SleepSatisfaction::Satisfeito => "Satisfeito",
            SleepSatisfaction::Insatisfeito => "Insatisfeito",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Satisfeito" => Some(SleepSatisfaction::Satisfeito),
            "Insatisfeito" => Some(SleepSatisfaction::Insatisfeito),
            _ => None,
        }
    }
}

/// Predominant diet profile. The server stores this as one boolean flag per
/// profile; the form collapses the flags into a single choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietProfile {
    #[serde(rename = "gordura")]
    Gordura,
    #[serde(rename = "carboidratos")]
    Carboidratos,
    #[serde(rename = "frutas")]
    Frutas,
}

/// Predominant diet composition, also flag-encoded server-side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietComposition {
    #[serde(rename = "fibras")]
    Fibras,
    #[serde(rename = "proteina")]
    Proteina,
    #[serde(rename = "legumes_verduras")]
    LegumesVerduras,
}

/// Recreation frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecreationFrequency {
    #[serde(rename = "3x_semana")]
    TresPorSemana,
    #[serde(rename = ">3x_semana")]
    MaisDeTresPorSemana,
}

impl RecreationFrequency {
    pub fn label(self) -> &'static str {
        match self {
            RecreationFrequency::TresPorSemana => "Três vezes/semana",
            RecreationFrequency::MaisDeTresPorSemana => "Mais de três vezes/semana",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Três vezes/semana" => Some(RecreationFrequency::TresPorSemana),
            "Mais de três vezes/semana" => Some(RecreationFrequency::MaisDeTresPorSemana),
            _ => None,
        }
    }
}

/// Housing tenure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HousingKind {
    #[serde(rename = "propria")]
    Propria,
    #[serde(rename = "cedida")]
    Cedida,
    #[serde(rename = "alugada")]
    Alugada,
}

impl HousingKind {
    pub fn label(self) -> &'static str {
        match self {
            HousingKind::Propria => "Própria",
            HousingKind::Cedida => "Cedida",
            HousingKind::Alugada => "Alugada",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Própria" => Some(HousingKind::Propria),
            "Cedida" => Some(HousingKind::Cedida),
            "Alugada" => Some(HousingKind::Alugada),
            _ => None,
        }
    }
}

/// Flat form state for one assessment record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    // Step 1: identification / anamnesis
    pub nome: String,
    /// Attendance date in ISO `YYYY-MM-DD` form (native date inputs).
    #[serde(rename = "dataAtendimento")]
    pub data_atendimento: String,
    pub naturalidade: String,
    pub religiao: String,
    pub sexo: String,
    pub idade: Option<u32>,
    pub filhos: Option<u32>,
    pub raca: String,
    #[serde(rename = "estadoCivil")]
    pub estado_civil: String,
    pub escolaridade: String,
    pub profissao: String,
    pub ocupacao: String,
    #[serde(rename = "diagnosticoMedicoAtual")]
    pub diagnostico_medico_atual: String,
    pub informante: Option<InformantKind>,
    pub hda: String,
    pub hp: String,
    #[serde(rename = "medicamentosUsuais")]
    pub medicamentos_usuais: String,
    #[serde(rename = "internacaoAnterior")]
    pub internacao_anterior: YesNo,
    #[serde(rename = "internacaoOndeQuando")]
    pub internacao_onde_quando: String,
    #[serde(rename = "internacaoMotivos")]
    pub internacao_motivos: String,
    #[serde(rename = "hf_DM")]
    pub hf_dm: bool,
    #[serde(rename = "hf_HAS")]
    pub hf_has: bool,
    #[serde(rename = "hf_Cardiopatias")]
    pub hf_cardiopatias: bool,
    #[serde(rename = "hf_Enxaqueca")]
    pub hf_enxaqueca: bool,
    #[serde(rename = "hf_TBC")]
    pub hf_tbc: bool,
    #[serde(rename = "hf_CA")]
    pub hf_ca: bool,

    // Step 2: psychosocial needs
    #[serde(rename = "etilismoFrequencia")]
    pub etilismo_frequencia: Option<DrinkingFrequency>,
    #[serde(rename = "etilismoTipo")]
    pub etilismo_tipo: String,
    #[serde(rename = "etilismoQuantidade")]
    pub etilismo_quantidade: String,
    /// `None` when smoking status was never answered (distinct from "no").
    pub tabagista: Option<YesNo>,
    #[serde(rename = "cigarrosDia")]
    pub cigarros_dia: Option<u32>,
    #[serde(rename = "exTabagistaTempo")]
    pub ex_tabagista_tempo: String,

    // Step 3: psychobiological needs
    #[serde(rename = "higieneCorporal")]
    pub higiene_corporal: String,
    #[serde(rename = "higieneBucal")]
    pub higiene_bucal: String,
    pub protese: YesNo,
    #[serde(rename = "sonoRepousoConforto")]
    pub sono_repouso_conforto: Option<SleepSatisfaction>,
    #[serde(rename = "alimentacaoTipo")]
    pub alimentacao_tipo: Option<DietProfile>,
    #[serde(rename = "alimentacaoComposicao")]
    pub alimentacao_composicao: Option<DietComposition>,
    #[serde(rename = "hidratacaoQuantidade")]
    pub hidratacao_quantidade: String,
    #[serde(rename = "atividadeFisica")]
    pub atividade_fisica: YesNo,
    #[serde(rename = "recreacaoFreq")]
    pub recreacao_freq: Option<RecreationFrequency>,
    #[serde(rename = "recreacaoDuracao")]
    pub recreacao_duracao: String,

    // Step 4: housing conditions
    pub moradia: Option<HousingKind>,
    #[serde(rename = "energiaEletrica")]
    pub energia_eletrica: YesNo,
    #[serde(rename = "aguaTratada")]
    pub agua_tratada: YesNo,
    #[serde(rename = "coletaLixo")]
    pub coleta_lixo: YesNo,
    #[serde(rename = "qtdResidem")]
    pub qtd_residem: Option<u32>,
    #[serde(rename = "qtdTrabalham")]
    pub qtd_trabalham: Option<u32>,

    // Step 5: vital measures
    #[serde(rename = "pesoKg")]
    pub peso_kg: Option<f64>,
    #[serde(rename = "alturaCm")]
    pub altura_cm: Option<f64>,
    #[serde(rename = "glicemiaCapilar")]
    pub glicemia_capilar: String,
    #[serde(rename = "paSistolica")]
    pub pa_sistolica: Option<u32>,
    #[serde(rename = "paDiastolica")]
    pub pa_diastolica: Option<u32>,
}

impl FormState {
    /// Flattens the form into the field map stored in a draft's `data`.
    ///
    /// Serialisation of this struct cannot fail in practice; the fallback to
    /// an empty map keeps the function total.
    pub fn to_fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Rebuilds a form from a draft field map, falling back to defaults when
    /// the map does not deserialise (for example after storage tampering).
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        serde_json::from_value(Value::Object(fields.clone())).unwrap_or_default()
    }
}
