//! Server wire model for a submitted nursing record.
//!
//! This is the exact nested shape the backend persists and returns, with
//! camelCase Portuguese keys and human-readable enumeration labels. The
//! structure is a contract: field names and nesting must not drift.
//!
//! Every group and leaf is optional-with-default so a record read from the
//! backend (or assembled by document extraction) deserialises even when
//! sections are absent; missing paths degrade during translation instead of
//! failing the read. Optional groups serialise as explicit `null` when unset
//! and are stripped by `sanitize_for_create` before submission.

use serde::{Deserialize, Serialize};

/// Nested server/domain shape of one nursing assessment record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerRecord {
    pub nome: String,
    /// Attendance date in the backend's `DD/MM/YYYY` form.
    pub data_atendimento: String,
    pub naturalidade: String,
    pub religiao: Option<Religion>,
    pub sexo: String,
    pub idade: Option<u32>,
    pub filhos_quantos: Option<u32>,
    pub raca: String,
    pub estado_civil: String,
    pub escolaridade: String,
    pub profissao: String,
    pub ocupacao: String,
    pub diagnostico_medico_atual: String,
    pub informante: Option<Informant>,
    pub hda: String,
    pub hp: String,
    pub medicamentos_usuais: String,
    pub internacao_anterior: Option<PriorAdmission>,
    pub historia_familiar: Option<FamilyHistory>,
    pub etilismo: Option<AlcoholUse>,
    pub tabagismo: Option<TobaccoUse>,
    pub cuidado_corporal: Option<BodyCare>,
    pub sono_repouso_conforto: Option<SleepRest>,
    pub nutricao_hidratacao: Option<NutritionHydration>,
    pub atividade_fisica: Option<PhysicalActivity>,
    pub recreacao: Option<Recreation>,
    pub moradia: Option<Housing>,
    pub peso_kg: Option<f64>,
    pub altura_cm: Option<f64>,
    pub glicemia_capilar: String,
    pub pa_sistolica: Option<u32>,
    pub pa_diastolica: Option<u32>,
}

/// `religiao` group; unset when the patient declared none.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Religion {
    pub nome: String,
}

/// `informante` group; `tipo` holds the label form (for example "Paciente").
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Informant {
    pub tipo: String,
}

/// `internacaoAnterior` group.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriorAdmission {
    pub teve: bool,
    pub onde_quando: String,
    pub motivos: String,
}

/// `historiaFamiliar` flags.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyHistory {
    pub dm: bool,
    pub has: bool,
    pub cardiopatias: bool,
    pub enxaqueca: bool,
    pub tbc: bool,
    pub ca: bool,
}

/// `etilismo` group; `frequencia` holds the label form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlcoholUse {
    pub frequencia: Option<String>,
    pub tipo: String,
    pub quantidade: String,
}

/// `tabagismo` group; the group itself is unset when smoking status was
/// never answered, so `tabagista: false` means an explicit "no".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TobaccoUse {
    pub tabagista: bool,
    pub cigarros_por_dia: Option<u32>,
    pub ex_tabagista_ha_quanto_tempo: String,
}

/// `cuidadoCorporal` group.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BodyCare {
    pub higiene_corporal_frequencia_dia: String,
    pub higiene_bucal_frequencia_dia: String,
    pub uso_protese: bool,
}

/// `sonoRepousoConforto` group; `satisfacao` holds the label form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepRest {
    pub satisfacao: Option<String>,
}

/// `nutricaoHidratacao` group.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionHydration {
    pub alimentacao: Option<Diet>,
    pub hidratacao: Option<Hydration>,
}

/// `nutricaoHidratacao.alimentacao` flags; the form collapses each pair of
/// flag families into a single coded choice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Diet {
    pub rica_em_frutas: bool,
    pub rica_em_gordura: bool,
    pub rica_em_carboidratos: bool,
    pub rica_em_fibras: bool,
    pub rica_em_proteina: bool,
    pub rica_em_legumes_e_verduras: bool,
}

/// `nutricaoHidratacao.hidratacao` group.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hydration {
    pub agua_quantidade_dia: String,
}

/// `atividadeFisica` group.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalActivity {
    pub pratica: bool,
}

/// `recreacao` group; `frequencia` holds the label form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recreation {
    pub frequencia: Option<String>,
    pub duracao: String,
}

/// `moradia` group; `tipo` holds the label form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Housing {
    pub tipo: Option<String>,
    pub energia_eletrica: bool,
    pub agua_tratada: bool,
    pub coleta_de_lixo: bool,
    pub quantos_residem: Option<u32>,
    pub quantos_trabalham: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialises_with_absent_sections() {
        let rec: ServerRecord = serde_json::from_str(r#"{"nome": "Maria"}"#).expect("parse");
        assert_eq!(rec.nome, "Maria");
        assert!(rec.informante.is_none());
        assert!(rec.moradia.is_none());
        assert_eq!(rec.idade, None);
    }

    #[test]
    fn honours_camel_case_wire_keys() {
        let rec: ServerRecord = serde_json::from_str(
            r#"{
                "dataAtendimento": "10/05/2024",
                "historiaFamiliar": {"dm": true},
                "nutricaoHidratacao": {"alimentacao": {"ricaEmLegumesEVerduras": true}},
                "moradia": {"quantosResidem": 4, "coletaDeLixo": true}
            }"#,
        )
        .expect("parse");

        assert_eq!(rec.data_atendimento, "10/05/2024");
        assert!(rec.historia_familiar.expect("hf").dm);
        let diet = rec
            .nutricao_hidratacao
            .expect("nutricao")
            .alimentacao
            .expect("alimentacao");
        assert!(diet.rica_em_legumes_e_verduras);
        let housing = rec.moradia.expect("moradia");
        assert_eq!(housing.quantos_residem, Some(4));
        assert!(housing.coleta_de_lixo);
    }

    #[test]
    fn unset_groups_serialise_as_explicit_null() {
        let value = serde_json::to_value(ServerRecord::default()).expect("serialise");
        assert!(value["informante"].is_null());
        assert!(value["religiao"].is_null());
        assert!(value["etilismo"].is_null());
        assert!(value["recreacao"].is_null());
    }
}
