//! Built-in word lists and the sampler feeding new rounds.

use rand::{Rng, rng, seq::SliceRandom};
use thiserror::Error;

use crate::state::round::WORDS_PER_ROUND;

/// Label shown when words are drawn from every category at once.
pub const MIXED_CATEGORY_DISPLAY_NAME: &str = "Categoría Mixta";

/// A themed list of words players can pick before a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCategory {
    /// Stable identifier used by clients.
    pub name: String,
    /// Human readable label.
    pub display_name: String,
    /// Words available in this category.
    pub words: Vec<String>,
}

impl WordCategory {
    /// Build a category from borrowed word literals.
    pub fn new(name: &str, display_name: &str, words: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            words: words.iter().map(|word| (*word).to_string()).collect(),
        }
    }
}

/// Sampling failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordsError {
    /// The selected pool holds fewer words than requested.
    #[error("requested {requested} words but only {available} are available")]
    NotEnoughWords {
        /// Number of words asked for.
        requested: usize,
        /// Size of the pool the words were drawn from.
        available: usize,
    },
}

/// Read-only catalogue of categories.
#[derive(Debug, Clone)]
pub struct WordRepository {
    categories: Vec<WordCategory>,
}

impl Default for WordRepository {
    fn default() -> Self {
        Self::with_categories(builtin_categories())
    }
}

impl WordRepository {
    /// Repository backed by the built-in categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository backed by a custom catalogue.
    pub fn with_categories(categories: Vec<WordCategory>) -> Self {
        Self { categories }
    }

    /// Copy of every category, in catalogue order.
    pub fn categories(&self) -> Vec<WordCategory> {
        self.categories.clone()
    }

    /// Look a category up by its identifier.
    pub fn find_category(&self, name: &str) -> Option<&WordCategory> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Draw `count` distinct entries from a category, or from every category
    /// when `category` is `None` or unknown.
    pub fn random_words(
        &self,
        count: usize,
        category: Option<&str>,
    ) -> Result<Vec<String>, WordsError> {
        self.random_words_with(&mut rng(), count, category)
    }

    /// Same as [`WordRepository::random_words`] with a caller-provided RNG.
    pub fn random_words_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        category: Option<&str>,
    ) -> Result<Vec<String>, WordsError> {
        let mut pool = self.pool(category);
        if pool.len() < count {
            return Err(WordsError::NotEnoughWords {
                requested: count,
                available: pool.len(),
            });
        }

        let (sample, _) = pool.partial_shuffle(rng, count);
        Ok(sample.iter().map(|word| (*word).to_string()).collect())
    }

    /// Words for a fresh round.
    pub fn words_for_round(&self, category: Option<&str>) -> Result<Vec<String>, WordsError> {
        self.random_words(WORDS_PER_ROUND, category)
    }

    /// Words for a fresh round drawn with a caller-provided RNG.
    pub fn words_for_round_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        category: Option<&str>,
    ) -> Result<Vec<String>, WordsError> {
        self.random_words_with(rng, WORDS_PER_ROUND, category)
    }

    fn pool(&self, category: Option<&str>) -> Vec<&str> {
        match category.and_then(|name| self.find_category(name)) {
            Some(category) => category.words.iter().map(String::as_str).collect(),
            None => self
                .categories
                .iter()
                .flat_map(|category| category.words.iter().map(String::as_str))
                .collect(),
        }
    }
}

fn builtin_categories() -> Vec<WordCategory> {
    vec![
        WordCategory::new(
            "animals",
            "Animales",
            &[
                "perro", "gato", "elefante", "león", "tigre", "oso", "lobo", "zorro", "conejo",
                "ratón", "caballo", "vaca", "cerdo", "oveja", "cabra", "pollo", "pato", "ganso",
                "pavo", "águila", "halcón", "búho", "cuervo", "paloma", "canario", "loro",
                "pingüino", "delfín", "ballena", "tiburón",
            ],
        ),
        WordCategory::new(
            "objects",
            "Objetos",
            &[
                "mesa", "silla", "cama", "sofá", "televisión", "teléfono", "ordenador", "libro",
                "lápiz", "papel", "coche", "bicicleta", "avión", "barco", "tren", "autobús",
                "moto", "camión", "casa", "edificio", "puerta", "ventana", "escalera", "ascensor",
                "puente", "carretera", "semáforo", "parque", "jardín", "árbol",
            ],
        ),
        WordCategory::new(
            "food",
            "Comida",
            &[
                "manzana", "naranja", "plátano", "fresa", "uva", "pera", "melocotón", "sandía",
                "melón", "piña", "pan", "queso", "leche", "huevo", "carne", "pescado", "pollo",
                "arroz", "pasta", "pizza", "hamburguesa", "ensalada", "sopa", "café", "té",
                "agua", "zumo", "vino", "cerveza", "helado",
            ],
        ),
        WordCategory::new(
            "professions",
            "Profesiones",
            &[
                "médico", "profesor", "ingeniero", "abogado", "policía", "bombero", "cocinero",
                "camarero", "vendedor", "conductor", "piloto", "marinero", "soldado", "artista",
                "músico", "actor", "escritor", "periodista", "fotógrafo", "dentista",
            ],
        ),
        WordCategory::new(
            "sports",
            "Deportes",
            &[
                "fútbol", "baloncesto", "tenis", "natación", "atletismo", "ciclismo", "boxeo",
                "golf", "esquí", "surf", "voleibol", "balonmano", "hockey", "rugby", "béisbol",
                "ping-pong", "badminton", "escalada", "yoga", "karate",
            ],
        ),
        WordCategory::new(
            "colors",
            "Colores",
            &[
                "rojo", "azul", "verde", "amarillo", "naranja", "morado", "rosa", "negro",
                "blanco", "gris", "marrón", "violeta", "turquesa", "dorado", "plateado", "beige",
                "coral", "índigo", "magenta", "cian",
            ],
        ),
        WordCategory::new(
            "emotions",
            "Emociones",
            &[
                "alegría", "tristeza", "miedo", "ira", "sorpresa", "amor", "odio", "esperanza",
                "nostalgia", "ansiedad", "felicidad", "melancolía", "euforia", "tranquilidad",
                "nerviosismo", "confianza", "vergüenza", "orgullo", "envidia", "gratitud",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn builtin_catalogue() {
        let repository = WordRepository::new();
        let names: Vec<String> = repository
            .categories()
            .into_iter()
            .map(|category| category.name)
            .collect();

        assert_eq!(
            names,
            vec!["animals", "objects", "food", "professions", "sports", "colors", "emotions"]
        );
        assert!(repository.categories().iter().all(|c| !c.words.is_empty()));

        let animals = repository.find_category("animals").unwrap();
        assert_eq!(animals.display_name, "Animales");
        assert!(animals.words.contains(&"elefante".to_string()));

        let food = repository.find_category("food").unwrap();
        assert_eq!(food.display_name, "Comida");
        assert!(food.words.contains(&"café".to_string()));
    }

    #[test]
    fn categories_are_copies() {
        let repository = WordRepository::new();
        let mut copy = repository.categories();
        copy[0].words.clear();
        copy.pop();

        assert_eq!(repository.categories().len(), 7);
        assert!(!repository.categories()[0].words.is_empty());
    }

    #[test]
    fn samples_from_selected_category_without_replacement() {
        let repository = WordRepository::new();
        let mut rng = StdRng::seed_from_u64(7);
        let colors = repository.find_category("colors").unwrap().words.clone();

        let words = repository
            .random_words_with(&mut rng, 20, Some("colors"))
            .unwrap();

        assert_eq!(words.len(), 20);
        assert!(words.iter().all(|word| colors.contains(word)));
        assert_eq!(words.iter().collect::<HashSet<_>>().len(), 20);
    }

    #[test]
    fn unknown_or_missing_category_uses_every_word() {
        let repository = WordRepository::with_categories(vec![
            WordCategory::new("a", "A", &["uno", "dos", "tres"]),
            WordCategory::new("b", "B", &["cuatro", "cinco", "seis"]),
        ]);
        let mut rng = StdRng::seed_from_u64(1);

        let words = repository
            .random_words_with(&mut rng, 6, Some("nonexistent"))
            .unwrap();
        assert_eq!(words.len(), 6);

        let words = repository.words_for_round_with(&mut rng, None).unwrap();
        assert_eq!(words.len(), WORDS_PER_ROUND);
    }

    #[test]
    fn short_pool_fails() {
        let repository =
            WordRepository::with_categories(vec![WordCategory::new("tiny", "Tiny", &["a", "b"])]);

        assert_eq!(
            repository.words_for_round(Some("tiny")),
            Err(WordsError::NotEnoughWords {
                requested: WORDS_PER_ROUND,
                available: 2,
            })
        );
    }

    #[test]
    fn round_words_come_from_category() {
        let repository = WordRepository::new();
        let emotions = repository.find_category("emotions").unwrap().words.clone();
        let words = repository.words_for_round(Some("emotions")).unwrap();

        assert_eq!(words.len(), WORDS_PER_ROUND);
        assert!(words.iter().all(|word| emotions.contains(word)));
    }
}
