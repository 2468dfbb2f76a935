// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "en";

// Mensagens de erro por idioma, indexadas pelo código estável do erro.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

impl I18nStore {
    pub fn new() -> Self {
        let en = HashMap::from([
            ("authentication_missing", "Missing or invalid authentication token."),
            ("authorization_denied", "You do not have access to this restaurant."),
            ("restaurant_id_required", "The restaurant_id parameter is required."),
            ("invalid_restaurant_id", "The restaurant id is not a valid UUID."),
            ("invalid_date", "The date must use the YYYY-MM-DD format."),
            ("restaurant_not_found", "Restaurant not found."),
            ("validation_failed", "One or more fields are invalid."),
            ("internal_error", "An unexpected error occurred."),
        ]);

        let pt = HashMap::from([
            ("authentication_missing", "Token de autenticação inválido ou ausente."),
            ("authorization_denied", "Você não tem acesso a este restaurante."),
            ("restaurant_id_required", "O parâmetro restaurant_id é obrigatório."),
            ("invalid_restaurant_id", "O ID do restaurante não é um UUID válido."),
            ("invalid_date", "A data deve usar o formato AAAA-MM-DD."),
            ("restaurant_not_found", "Restaurante não encontrado."),
            ("validation_failed", "Um ou mais campos são inválidos."),
            ("internal_error", "Ocorreu um erro inesperado."),
        ]);

        Self { messages: HashMap::from([("en", en), ("pt", pt)]) }
    }

    pub fn supports(&self, lang: &str) -> bool {
        self.messages.contains_key(lang)
    }

    /// Mensagem no idioma pedido, caindo para inglês e depois para o próprio código.
    pub fn message(&self, lang: &str, code: &'static str) -> String {
        self.messages
            .get(lang)
            .and_then(|table| table.get(code))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|table| table.get(code)))
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| code.to_string())
    }
}
