use crate::model::{CountryVariant, Instituicao};

/// In-memory, not-yet-persisted institution being created or edited.
///
/// All fields are plain strings mirroring what the form captures; empty means
/// "not entered". The draft survives back/forward navigation between the two
/// form steps and is only turned into a wire payload at submission time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstituicaoDraft {
    /// Present when editing an existing record.
    pub id: Option<u64>,
    pub nome: String,
    pub sigla: String,
    pub pais: String,
    pub cep: String,
    pub logradouro: String,
    pub bairro: String,
    pub estado: String,
    pub municipio: String,
    pub numero: String,
    pub complemento: String,
    pub cnpj: String,
}

impl InstituicaoDraft {
    /// Variant for the draft's current country value (recomputed, never cached).
    pub fn variant(&self) -> CountryVariant {
        CountryVariant::of(&self.pais)
    }

    /// Hydrate a draft from a fetched record (edit/view mode).
    pub fn from_record(record: &Instituicao) -> Self {
        Self {
            id: Some(record.id),
            nome: record.nome.clone(),
            sigla: record.sigla.clone(),
            pais: record.pais.clone(),
            cep: record.cep.clone().unwrap_or_default(),
            logradouro: record.logradouro.clone(),
            bairro: record.bairro.clone().unwrap_or_default(),
            estado: record.estado.clone(),
            municipio: record.municipio.clone(),
            numero: record.numero.clone().unwrap_or_default(),
            complemento: record.complemento.clone().unwrap_or_default(),
            cnpj: record.cnpj.clone().unwrap_or_default(),
        }
    }

    /// Merge a CEP lookup result into the draft, overwriting the four address
    /// fields the reference service provides.
    pub fn apply_endereco(&mut self, endereco: &crate::brasilapi::Endereco) {
        self.estado = endereco.state.clone();
        self.municipio = endereco.city.clone();
        self.logradouro = endereco.street.clone();
        self.bairro = endereco.neighborhood.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brasilapi::Endereco;
    use pretty_assertions::assert_eq;

    #[test]
    fn endereco_merge_overwrites_only_the_four_address_fields() {
        let mut draft = InstituicaoDraft {
            nome: "UFMS".into(),
            pais: "Brasil".into(),
            cep: "79002090".into(),
            estado: "old".into(),
            municipio: "old".into(),
            logradouro: "old".into(),
            bairro: "old".into(),
            numero: "123".into(),
            ..Default::default()
        };
        draft.apply_endereco(&Endereco {
            cep: "79002090".into(),
            state: "MS".into(),
            city: "Campo Grande".into(),
            street: "Rua Quatorze de Julho".into(),
            neighborhood: "Centro".into(),
        });
        assert_eq!(draft.estado, "MS");
        assert_eq!(draft.municipio, "Campo Grande");
        assert_eq!(draft.logradouro, "Rua Quatorze de Julho");
        assert_eq!(draft.bairro, "Centro");
        // untouched
        assert_eq!(draft.nome, "UFMS");
        assert_eq!(draft.numero, "123");
    }
}
