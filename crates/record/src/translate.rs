//! Translation between the flat form state and the nested server record.
//!
//! Three deterministic structural mappings with no shared state:
//!
//! - [`server_to_form`]: typed server record → flat form (edit mode).
//! - [`form_to_server`]: flat form → typed server record (create/update).
//! - [`schema_to_form`]: untyped extraction output → flat form (intake).
//!
//! All three are total. Missing or malformed input degrades to empty-string
//! text, the default "no" code for boolean-like fields and `None` for
//! numeric fields, never to an error. Numeric fields never default to zero
//! so "not entered" stays distinguishable from an entered zero.
//!
//! Round-trip invariant: for a consistent form state `f`,
//! `server_to_form(&form_to_server(&f)) == f` — every coded field has an
//! exact inverse in its lookup table and free-text fields pass through
//! unchanged.

use crate::dates::{br_to_iso, to_date_br};
use crate::form::{
    DietComposition, DietProfile, DrinkingFrequency, FormState, HousingKind, InformantKind,
    RecreationFrequency, SleepSatisfaction, YesNo,
};
use crate::merge::sanitize_for_create;
use crate::server::{
    AlcoholUse, BodyCare, Diet, FamilyHistory, Housing, Hydration, Informant,
    NutritionHydration, PhysicalActivity, PriorAdmission, Recreation, Religion, ServerRecord,
    SleepRest, TobaccoUse,
};
use serde_json::Value;

/// Nested server shape → flat form shape (edit mode).
pub fn server_to_form(rec: &ServerRecord) -> FormState {
    let diet = rec
        .nutricao_hidratacao
        .as_ref()
        .and_then(|n| n.alimentacao.as_ref());

    FormState {
        nome: rec.nome.clone(),
        data_atendimento: br_to_iso(&rec.data_atendimento),
        naturalidade: rec.naturalidade.clone(),
        religiao: rec.religiao.as_ref().map(|r| r.nome.clone()).unwrap_or_default(),
        sexo: rec.sexo.clone(),
        idade: rec.idade,
        filhos: rec.filhos_quantos,
        raca: rec.raca.clone(),
        estado_civil: rec.estado_civil.clone(),
        escolaridade: rec.escolaridade.clone(),
        profissao: rec.profissao.clone(),
        ocupacao: rec.ocupacao.clone(),
        diagnostico_medico_atual: rec.diagnostico_medico_atual.clone(),
        informante: rec
            .informante
            .as_ref()
            .and_then(|i| InformantKind::from_label(&i.tipo)),
        hda: rec.hda.clone(),
        hp: rec.hp.clone(),
        medicamentos_usuais: rec.medicamentos_usuais.clone(),
        internacao_anterior: YesNo::from_bool(
            rec.internacao_anterior.as_ref().is_some_and(|i| i.teve),
        ),
        internacao_onde_quando: rec
            .internacao_anterior
            .as_ref()
            .map(|i| i.onde_quando.clone())
            .unwrap_or_default(),
        internacao_motivos: rec
            .internacao_anterior
            .as_ref()
            .map(|i| i.motivos.clone())
            .unwrap_or_default(),
        hf_dm: rec.historia_familiar.as_ref().is_some_and(|h| h.dm),
        hf_has: rec.historia_familiar.as_ref().is_some_and(|h| h.has),
        hf_cardiopatias: rec.historia_familiar.as_ref().is_some_and(|h| h.cardiopatias),
        hf_enxaqueca: rec.historia_familiar.as_ref().is_some_and(|h| h.enxaqueca),
        hf_tbc: rec.historia_familiar.as_ref().is_some_and(|h| h.tbc),
        hf_ca: rec.historia_familiar.as_ref().is_some_and(|h| h.ca),

        etilismo_frequencia: rec
            .etilismo
            .as_ref()
            .and_then(|e| e.frequencia.as_deref())
            .and_then(DrinkingFrequency::from_label),
        etilismo_tipo: rec
            .etilismo
            .as_ref()
            .map(|e| e.tipo.clone())
            .unwrap_or_default(),
        etilismo_quantidade: rec
            .etilismo
            .as_ref()
            .map(|e| e.quantidade.clone())
            .unwrap_or_default(),
        tabagista: rec
            .tabagismo
            .as_ref()
            .map(|t| YesNo::from_bool(t.tabagista)),
        cigarros_dia: rec.tabagismo.as_ref().and_then(|t| t.cigarros_por_dia),
        ex_tabagista_tempo: rec
            .tabagismo
            .as_ref()
            .map(|t| t.ex_tabagista_ha_quanto_tempo.clone())
            .unwrap_or_default(),

        higiene_corporal: rec
            .cuidado_corporal
            .as_ref()
            .map(|c| c.higiene_corporal_frequencia_dia.clone())
            .unwrap_or_default(),
        higiene_bucal: rec
            .cuidado_corporal
            .as_ref()
            .map(|c| c.higiene_bucal_frequencia_dia.clone())
            .unwrap_or_default(),
        protese: YesNo::from_bool(rec.cuidado_corporal.as_ref().is_some_and(|c| c.uso_protese)),
        sono_repouso_conforto: rec
            .sono_repouso_conforto
            .as_ref()
            .and_then(|s| s.satisfacao.as_deref())
            .and_then(SleepSatisfaction::from_label),
        alimentacao_tipo: diet.and_then(diet_profile),
        alimentacao_composicao: diet.and_then(diet_composition),
        hidratacao_quantidade: rec
            .nutricao_hidratacao
            .as_ref()
            .and_then(|n| n.hidratacao.as_ref())
            .map(|h| h.agua_quantidade_dia.clone())
            .unwrap_or_default(),
        atividade_fisica: YesNo::from_bool(
            rec.atividade_fisica.as_ref().is_some_and(|a| a.pratica),
        ),
        recreacao_freq: rec
            .recreacao
            .as_ref()
            .and_then(|r| r.frequencia.as_deref())
            .and_then(RecreationFrequency::from_label),
        recreacao_duracao: rec
            .recreacao
            .as_ref()
            .map(|r| r.duracao.clone())
            .unwrap_or_default(),

        moradia: rec
            .moradia
            .as_ref()
            .and_then(|m| m.tipo.as_deref())
            .and_then(HousingKind::from_label),
        energia_eletrica: YesNo::from_bool(
            rec.moradia.as_ref().is_some_and(|m| m.energia_eletrica),
        ),
        agua_tratada: YesNo::from_bool(rec.moradia.as_ref().is_some_and(|m| m.agua_tratada)),
        coleta_lixo: YesNo::from_bool(rec.moradia.as_ref().is_some_and(|m| m.coleta_de_lixo)),
        qtd_residem: rec.moradia.as_ref().and_then(|m| m.quantos_residem),
        qtd_trabalham: rec.moradia.as_ref().and_then(|m| m.quantos_trabalham),

        peso_kg: rec.peso_kg,
        altura_cm: rec.altura_cm,
        glicemia_capilar: rec.glicemia_capilar.clone(),
        pa_sistolica: rec.pa_sistolica,
        pa_diastolica: rec.pa_diastolica,
    }
}

// Flag priority mirrors the form's single-choice collapse of the server's
// flag family: fat, then carbohydrates, then fruit.
fn diet_profile(diet: &Diet) -> Option<DietProfile> {
    if diet.rica_em_gordura {
        Some(DietProfile::Gordura)
    } else if diet.rica_em_carboidratos {
        Some(DietProfile::Carboidratos)
    } else if diet.rica_em_frutas {
        Some(DietProfile::Frutas)
    } else {
        None
    }
}

fn diet_composition(diet: &Diet) -> Option<DietComposition> {
    if diet.rica_em_fibras {
        Some(DietComposition::Fibras)
    } else if diet.rica_em_proteina {
        Some(DietComposition::Proteina)
    } else if diet.rica_em_legumes_e_verduras {
        Some(DietComposition::LegumesVerduras)
    } else {
        None
    }
}

fn blank(s: &str) -> bool {
    s.is_empty()
}

/// Flat form shape → nested server shape (create/update).
///
/// Optional groups (`informante`, `religiao`, `etilismo`, `tabagismo`,
/// `sonoRepousoConforto`, `recreacao`) come out as `None` when every one of
/// their source fields is blank, computed per group.
pub fn form_to_server(form: &FormState) -> ServerRecord {
    let etilismo = if form.etilismo_frequencia.is_some()
        || !blank(&form.etilismo_tipo)
        || !blank(&form.etilismo_quantidade)
    {
        Some(AlcoholUse {
            frequencia: form.etilismo_frequencia.map(|f| f.label().to_string()),
            tipo: form.etilismo_tipo.clone(),
            quantidade: form.etilismo_quantidade.clone(),
        })
    } else {
        None
    };

    let recreacao = if form.recreacao_freq.is_some() || !blank(&form.recreacao_duracao) {
        Some(Recreation {
            frequencia: form.recreacao_freq.map(|f| f.label().to_string()),
            duracao: form.recreacao_duracao.clone(),
        })
    } else {
        None
    };

    let internacao_anterior = if form.internacao_anterior.is_yes() {
        PriorAdmission {
            teve: true,
            onde_quando: form.internacao_onde_quando.clone(),
            motivos: form.internacao_motivos.clone(),
        }
    } else {
        PriorAdmission::default()
    };

    ServerRecord {
        nome: form.nome.clone(),
        // the backend receives DD/MM/YYYY
        data_atendimento: to_date_br(&form.data_atendimento),
        naturalidade: form.naturalidade.clone(),
        religiao: (!blank(&form.religiao)).then(|| Religion {
            nome: form.religiao.clone(),
        }),
        sexo: form.sexo.clone(),
        idade: form.idade,
        filhos_quantos: form.filhos,
        raca: form.raca.clone(),
        estado_civil: form.estado_civil.clone(),
        escolaridade: form.escolaridade.clone(),
        profissao: form.profissao.clone(),
        ocupacao: form.ocupacao.clone(),
        diagnostico_medico_atual: form.diagnostico_medico_atual.clone(),
        informante: form.informante.map(|kind| Informant {
            tipo: kind.label().to_string(),
        }),
        hda: form.hda.clone(),
        hp: form.hp.clone(),
        medicamentos_usuais: form.medicamentos_usuais.clone(),
        internacao_anterior: Some(internacao_anterior),
        historia_familiar: Some(FamilyHistory {
            dm: form.hf_dm,
            has: form.hf_has,
            cardiopatias: form.hf_cardiopatias,
            enxaqueca: form.hf_enxaqueca,
            tbc: form.hf_tbc,
            ca: form.hf_ca,
        }),
        etilismo,
        tabagismo: form.tabagista.map(|answer| TobaccoUse {
            tabagista: answer.is_yes(),
            cigarros_por_dia: form.cigarros_dia,
            ex_tabagista_ha_quanto_tempo: form.ex_tabagista_tempo.clone(),
        }),
        cuidado_corporal: Some(BodyCare {
            higiene_corporal_frequencia_dia: form.higiene_corporal.clone(),
            higiene_bucal_frequencia_dia: form.higiene_bucal.clone(),
            uso_protese: form.protese.is_yes(),
        }),
        sono_repouso_conforto: form.sono_repouso_conforto.map(|s| SleepRest {
            satisfacao: Some(s.label().to_string()),
        }),
        nutricao_hidratacao: Some(NutritionHydration {
            alimentacao: Some(Diet {
                rica_em_frutas: form.alimentacao_tipo == Some(DietProfile::Frutas),
                rica_em_gordura: form.alimentacao_tipo == Some(DietProfile::Gordura),
                rica_em_carboidratos: form.alimentacao_tipo == Some(DietProfile::Carboidratos),
                rica_em_fibras: form.alimentacao_composicao == Some(DietComposition::Fibras),
                rica_em_proteina: form.alimentacao_composicao == Some(DietComposition::Proteina),
                rica_em_legumes_e_verduras: form.alimentacao_composicao
                    == Some(DietComposition::LegumesVerduras),
            }),
            hidratacao: Some(Hydration {
                agua_quantidade_dia: form.hidratacao_quantidade.clone(),
            }),
        }),
        atividade_fisica: Some(PhysicalActivity {
            pratica: form.atividade_fisica.is_yes(),
        }),
        recreacao,
        moradia: Some(Housing {
            tipo: form.moradia.map(|kind| kind.label().to_string()),
            energia_eletrica: form.energia_eletrica.is_yes(),
            agua_tratada: form.agua_tratada.is_yes(),
            coleta_de_lixo: form.coleta_lixo.is_yes(),
            quantos_residem: form.qtd_residem,
            quantos_trabalham: form.qtd_trabalham,
        }),
        peso_kg: form.peso_kg,
        altura_cm: form.altura_cm,
        glicemia_capilar: form.glicemia_capilar.clone(),
        pa_sistolica: form.pa_sistolica,
        pa_diastolica: form.pa_diastolica,
    }
}

/// Builds the sanitised create/update payload posted to the backend:
/// [`form_to_server`] followed by [`sanitize_for_create`].
pub fn create_payload(form: &FormState) -> Value {
    let record = form_to_server(form);
    let value = serde_json::to_value(&record).unwrap_or(Value::Null);
    sanitize_for_create(value)
}

/// Untyped extraction output → flat form shape (intake).
///
/// Structurally the same mapping as [`server_to_form`] but over loose JSON:
/// extraction output routinely has missing sections, extra keys and mistyped
/// leaves, so every path is read leniently and anything unusable degrades to
/// the field's default.
pub fn schema_to_form(rec: &Value) -> FormState {
    let informante = text(at(rec, &["informante", "tipo"]));
    let tabagismo = at(rec, &["tabagismo"]);
    let diet = at(rec, &["nutricaoHidratacao", "alimentacao"]);

    FormState {
        nome: text(at(rec, &["nome"])),
        data_atendimento: br_to_iso(&text(at(rec, &["dataAtendimento"]))),
        naturalidade: text(at(rec, &["naturalidade"])),
        religiao: text(at(rec, &["religiao", "nome"])),
        sexo: text(at(rec, &["sexo"])),
        idade: integer(at(rec, &["idade"])),
        filhos: integer(at(rec, &["filhosQuantos"])),
        raca: text(at(rec, &["raca"])),
        estado_civil: text(at(rec, &["estadoCivil"])),
        escolaridade: text(at(rec, &["escolaridade"])),
        profissao: text(at(rec, &["profissao"])),
        ocupacao: text(at(rec, &["ocupacao"])),
        diagnostico_medico_atual: text(at(rec, &["diagnosticoMedicoAtual"])),
        informante: InformantKind::from_label(&informante),
        hda: text(at(rec, &["hda"])),
        hp: text(at(rec, &["hp"])),
        medicamentos_usuais: text(at(rec, &["medicamentosUsuais"])),
        internacao_anterior: YesNo::from_bool(truthy(at(rec, &["internacaoAnterior", "teve"]))),
        internacao_onde_quando: text(at(rec, &["internacaoAnterior", "ondeQuando"])),
        internacao_motivos: text(at(rec, &["internacaoAnterior", "motivos"])),
        hf_dm: truthy(at(rec, &["historiaFamiliar", "dm"])),
        hf_has: truthy(at(rec, &["historiaFamiliar", "has"])),
        hf_cardiopatias: truthy(at(rec, &["historiaFamiliar", "cardiopatias"])),
        hf_enxaqueca: truthy(at(rec, &["historiaFamiliar", "enxaqueca"])),
        hf_tbc: truthy(at(rec, &["historiaFamiliar", "tbc"])),
        hf_ca: truthy(at(rec, &["historiaFamiliar", "ca"])),

        etilismo_frequencia: DrinkingFrequency::from_label(&text(at(
            rec,
            &["etilismo", "frequencia"],
        ))),
        etilismo_tipo: text(at(rec, &["etilismo", "tipo"])),
        etilismo_quantidade: text(at(rec, &["etilismo", "quantidade"])),
        tabagista: tabagismo
            .filter(|t| t.is_object())
            .map(|t| YesNo::from_bool(truthy(t.get("tabagista")))),
        cigarros_dia: integer(at(rec, &["tabagismo", "cigarrosPorDia"])),
        ex_tabagista_tempo: text(at(rec, &["tabagismo", "exTabagistaHaQuantoTempo"])),

        higiene_corporal: text(at(rec, &["cuidadoCorporal", "higieneCorporalFrequenciaDia"])),
        higiene_bucal: text(at(rec, &["cuidadoCorporal", "higieneBucalFrequenciaDia"])),
        protese: YesNo::from_bool(truthy(at(rec, &["cuidadoCorporal", "usoProtese"]))),
        sono_repouso_conforto: SleepSatisfaction::from_label(&text(at(
            rec,
            &["sonoRepousoConforto", "satisfacao"],
        ))),
        alimentacao_tipo: if truthy(diet.and_then(|d| d.get("ricaEmGordura"))) {
            Some(DietProfile::Gordura)
        } else if truthy(diet.and_then(|d| d.get("ricaEmCarboidratos"))) {
            Some(DietProfile::Carboidratos)
        } else if truthy(diet.and_then(|d| d.get("ricaEmFrutas"))) {
            Some(DietProfile::Frutas)
        } else {
            None
        },
        alimentacao_composicao: if truthy(diet.and_then(|d| d.get("ricaEmFibras"))) {
            Some(DietComposition::Fibras)
        } else if truthy(diet.and_then(|d| d.get("ricaEmProteina"))) {
            Some(DietComposition::Proteina)
        } else if truthy(diet.and_then(|d| d.get("ricaEmLegumesEVerduras"))) {
            Some(DietComposition::LegumesVerduras)
        } else {
            None
        },
        hidratacao_quantidade: text(at(
            rec,
            &["nutricaoHidratacao", "hidratacao", "aguaQuantidadeDia"],
        )),
        atividade_fisica: YesNo::from_bool(truthy(at(rec, &["atividadeFisica", "pratica"]))),
        recreacao_freq: RecreationFrequency::from_label(&text(at(
            rec,
            &["recreacao", "frequencia"],
        ))),
        recreacao_duracao: text(at(rec, &["recreacao", "duracao"])),

        moradia: HousingKind::from_label(&text(at(rec, &["moradia", "tipo"]))),
        energia_eletrica: YesNo::from_bool(truthy(at(rec, &["moradia", "energiaEletrica"]))),
        agua_tratada: YesNo::from_bool(truthy(at(rec, &["moradia", "aguaTratada"]))),
        coleta_lixo: YesNo::from_bool(truthy(at(rec, &["moradia", "coletaDeLixo"]))),
        qtd_residem: integer(at(rec, &["moradia", "quantosResidem"])),
        qtd_trabalham: integer(at(rec, &["moradia", "quantosTrabalham"])),

        peso_kg: float(at(rec, &["pesoKg"])),
        altura_cm: float(at(rec, &["alturaCm"])),
        glicemia_capilar: text(at(rec, &["glicemiaCapilar"])),
        pa_sistolica: integer(at(rec, &["paSistolica"])),
        pa_diastolica: integer(at(rec, &["paDiastolica"])),
    }
}

// Lenient navigation and coercion over extraction output.

fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    Some(current)
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        _ => false,
    }
}

fn integer(value: Option<&Value>) -> Option<u32> {
    match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

fn float(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn populated_form() -> FormState {
        FormState {
            nome: "Maria das Dores".into(),
            data_atendimento: "2024-05-10".into(),
            naturalidade: "Fortaleza".into(),
            religiao: "Católica".into(),
            sexo: "F".into(),
            idade: Some(63),
            filhos: Some(2),
            raca: "Parda".into(),
            estado_civil: "Casada".into(),
            escolaridade: "Fundamental".into(),
            profissao: "Costureira".into(),
            ocupacao: "Aposentada".into(),
            diagnostico_medico_atual: "DM2 descompensado".into(),
            informante: Some(InformantKind::MembroFamilia),
            hda: "Dor torácica há 2 dias".into(),
            hp: "HAS há 10 anos".into(),
            medicamentos_usuais: "Losartana 50mg".into(),
            internacao_anterior: YesNo::Sim,
            internacao_onde_quando: "HGF, 2021".into(),
            internacao_motivos: "Crise hipertensiva".into(),
            hf_dm: true,
            hf_has: true,
            hf_cardiopatias: false,
            hf_enxaqueca: false,
            hf_tbc: false,
            hf_ca: true,
            etilismo_frequencia: Some(DrinkingFrequency::Social),
            etilismo_tipo: "Cerveja".into(),
            etilismo_quantidade: "2 latas".into(),
            tabagista: Some(YesNo::Nao),
            cigarros_dia: None,
            ex_tabagista_tempo: "5 anos".into(),
            higiene_corporal: "2".into(),
            higiene_bucal: "3".into(),
            protese: YesNo::Sim,
            sono_repouso_conforto: Some(SleepSatisfaction::Insatisfeito),
            alimentacao_tipo: Some(DietProfile::Carboidratos),
            alimentacao_composicao: Some(DietComposition::Fibras),
            hidratacao_quantidade: "1.5L".into(),
            atividade_fisica: YesNo::Nao,
            recreacao_freq: Some(RecreationFrequency::TresPorSemana),
            recreacao_duracao: "1 hora".into(),
            moradia: Some(HousingKind::Propria),
            energia_eletrica: YesNo::Sim,
            agua_tratada: YesNo::Sim,
            coleta_lixo: YesNo::Nao,
            qtd_residem: Some(4),
            qtd_trabalham: Some(1),
            peso_kg: Some(72.5),
            altura_cm: Some(158.0),
            glicemia_capilar: "180 mg/dL".into(),
            pa_sistolica: Some(140),
            pa_diastolica: Some(90),
        }
    }

    #[test]
    fn round_trips_a_fully_populated_form() {
        let form = populated_form();
        let back = server_to_form(&form_to_server(&form));
        assert_eq!(back, form);
    }

    #[test]
    fn form_to_server_converts_codes_to_labels() {
        let record = form_to_server(&populated_form());
        assert_eq!(record.data_atendimento, "10/05/2024");
        assert_eq!(record.informante.expect("informante").tipo, "Membro da Família");
        assert_eq!(
            record.etilismo.expect("etilismo").frequencia.as_deref(),
            Some("Social")
        );
        assert_eq!(
            record.moradia.as_ref().expect("moradia").tipo.as_deref(),
            Some("Própria")
        );
        assert_eq!(
            record
                .recreacao
                .expect("recreacao")
                .frequencia
                .as_deref(),
            Some("Três vezes/semana")
        );
    }

    #[test]
    fn empty_form_unsets_every_optional_group() {
        let record = form_to_server(&FormState::default());
        assert!(record.informante.is_none());
        assert!(record.religiao.is_none());
        assert!(record.etilismo.is_none());
        assert!(record.recreacao.is_none());
        assert!(record.tabagismo.is_none());
        assert!(record.sono_repouso_conforto.is_none());
        // mandatory groups stay present
        assert_eq!(
            record.internacao_anterior.expect("internacao").teve,
            false
        );
        assert!(record.historia_familiar.is_some());
    }

    #[test]
    fn blank_numeric_fields_stay_unset_not_zero() {
        let record = form_to_server(&FormState::default());
        assert_eq!(record.idade, None);
        assert_eq!(record.peso_kg, None);
        assert_eq!(record.pa_sistolica, None);
    }

    #[test]
    fn absent_server_paths_degrade_to_defaults() {
        let form = server_to_form(&ServerRecord::default());
        assert_eq!(form.nome, "");
        assert_eq!(form.idade, None);
        assert_eq!(form.protese, YesNo::Nao);
        assert_eq!(form.tabagista, None);
        assert_eq!(form.internacao_anterior, YesNo::Nao);
        assert_eq!(form.moradia, None);
    }

    #[test]
    fn unknown_enum_labels_degrade_to_unset() {
        let rec = ServerRecord {
            moradia: Some(Housing {
                tipo: Some("Emprestada".into()),
                ..Housing::default()
            }),
            ..ServerRecord::default()
        };
        assert_eq!(server_to_form(&rec).moradia, None);
    }

    #[test]
    fn tobacco_group_distinguishes_no_from_unanswered() {
        let unanswered = server_to_form(&ServerRecord::default());
        assert_eq!(unanswered.tabagista, None);

        let declined = server_to_form(&ServerRecord {
            tabagismo: Some(TobaccoUse::default()),
            ..ServerRecord::default()
        });
        assert_eq!(declined.tabagista, Some(YesNo::Nao));
    }

    #[test]
    fn create_payload_drops_nulls_and_keeps_false_flags() {
        let payload = create_payload(&FormState::default());
        assert!(payload.get("informante").is_none());
        assert!(payload.get("religiao").is_none());
        assert!(payload.get("nome").is_none());
        // false survives pruning: an explicit "no family history" answer
        assert_eq!(payload["historiaFamiliar"]["dm"], false);
        assert_eq!(payload["internacaoAnterior"]["teve"], false);
    }

    #[test]
    fn schema_to_form_maps_labels_and_nested_paths() {
        let extraction = json!({
            "nome": "Maria das Dores",
            "dataAtendimento": "10/05/2024",
            "informante": {"tipo": "Paciente"},
            "historiaFamiliar": {"dm": true, "ca": false},
            "etilismo": {"frequencia": "Todos os dias", "tipo": "Cachaça"},
            "tabagismo": {"tabagista": true, "cigarrosPorDia": 10},
            "moradia": {"tipo": "Alugada", "quantosResidem": 3, "aguaTratada": true},
            "pesoKg": 80.2
        });

        let form = schema_to_form(&extraction);
        assert_eq!(form.nome, "Maria das Dores");
        assert_eq!(form.data_atendimento, "2024-05-10");
        assert_eq!(form.informante, Some(InformantKind::Paciente));
        assert!(form.hf_dm);
        assert!(!form.hf_ca);
        assert_eq!(form.etilismo_frequencia, Some(DrinkingFrequency::TodosOsDias));
        assert_eq!(form.etilismo_tipo, "Cachaça");
        assert_eq!(form.tabagista, Some(YesNo::Sim));
        assert_eq!(form.cigarros_dia, Some(10));
        assert_eq!(form.moradia, Some(HousingKind::Alugada));
        assert_eq!(form.qtd_residem, Some(3));
        assert_eq!(form.agua_tratada, YesNo::Sim);
        assert_eq!(form.peso_kg, Some(80.2));
    }

    #[test]
    fn schema_to_form_never_fails_on_noisy_input() {
        // mistyped leaves, unknown labels, extra keys, wrong containers
        let noisy = json!({
            "nome": 42,
            "idade": "63",
            "informante": "Paciente",
            "moradia": {"tipo": 7},
            "etilismo": [],
            "historiaFamiliar": {"dm": "sim"},
            "unexpected": {"deeply": ["nested"]}
        });

        let form = schema_to_form(&noisy);
        assert_eq!(form.nome, "42");
        assert_eq!(form.idade, Some(63));
        // a bare string where a group was expected leaves the field unset
        assert_eq!(form.informante, None);
        assert_eq!(form.moradia, None);
        // non-empty string counts as a truthy flag
        assert!(form.hf_dm);

        assert_eq!(schema_to_form(&Value::Null), FormState::default());
        assert_eq!(schema_to_form(&json!([1, 2, 3])), FormState::default());
    }

    #[test]
    fn schema_to_form_distinguishes_tobacco_presence() {
        let absent = schema_to_form(&json!({"nome": "Ana"}));
        assert_eq!(absent.tabagista, None);

        let declined = schema_to_form(&json!({"tabagismo": {"tabagista": false}}));
        assert_eq!(declined.tabagista, Some(YesNo::Nao));
    }
}
