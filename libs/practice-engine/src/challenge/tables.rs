//! Built-in seed verbs for Spanish, French and German.
//!
//! Content stores normally supply their own tables; this set covers the
//! common irregular and stem-changing paradigms plus a few regular verbs.

use crate::error::Result;
use crate::types::{Language, Person, Tense, VerbClass};

use super::conjugation::{ConjugationTable, VerbEntry};

use Language::{De, Es, Fr};
use Tense::{Future, Present, Preterite};
use VerbClass::{Irregular, Regular, StemChanging};

pub fn builtin_verbs() -> Vec<VerbEntry> {
    let mut verbs = Vec::new();
    verbs.extend(spanish());
    verbs.extend(french());
    verbs.extend(german());
    verbs
}

/// The built-in verbs as a ready table.
pub fn builtin_table() -> Result<ConjugationTable> {
    ConjugationTable::new(builtin_verbs())
}

fn spanish() -> Vec<VerbEntry> {
    vec![
        VerbEntry::new("hablar", Es, Regular).with_translation("to speak"),
        VerbEntry::new("comer", Es, Regular).with_translation("to eat"),
        VerbEntry::new("vivir", Es, Regular).with_translation("to live"),
        VerbEntry::new("estudiar", Es, Regular).with_translation("to study"),
        VerbEntry::new("ser", Es, Irregular)
            .with_translation("to be")
            .with_paradigm(Present, ["soy", "eres", "es", "somos", "sois", "son"])
            .with_paradigm(Preterite, ["fui", "fuiste", "fue", "fuimos", "fuisteis", "fueron"])
            .with_paradigm(Future, ["seré", "serás", "será", "seremos", "seréis", "serán"]),
        VerbEntry::new("estar", Es, Irregular)
            .with_translation("to be")
            .with_paradigm(Present, ["estoy", "estás", "está", "estamos", "estáis", "están"])
            .with_paradigm(
                Preterite,
                ["estuve", "estuviste", "estuvo", "estuvimos", "estuvisteis", "estuvieron"],
            )
            .with_paradigm(
                Future,
                ["estaré", "estarás", "estará", "estaremos", "estaréis", "estarán"],
            ),
        VerbEntry::new("tener", Es, Irregular)
            .with_translation("to have")
            .with_paradigm(Present, ["tengo", "tienes", "tiene", "tenemos", "tenéis", "tienen"])
            .with_paradigm(
                Preterite,
                ["tuve", "tuviste", "tuvo", "tuvimos", "tuvisteis", "tuvieron"],
            )
            .with_paradigm(
                Future,
                ["tendré", "tendrás", "tendrá", "tendremos", "tendréis", "tendrán"],
            ),
        VerbEntry::new("hacer", Es, Irregular)
            .with_translation("to do")
            .with_paradigm(Present, ["hago", "haces", "hace", "hacemos", "hacéis", "hacen"])
            .with_paradigm(
                Preterite,
                ["hice", "hiciste", "hizo", "hicimos", "hicisteis", "hicieron"],
            )
            .with_paradigm(Future, ["haré", "harás", "hará", "haremos", "haréis", "harán"]),
        VerbEntry::new("ir", Es, Irregular)
            .with_translation("to go")
            .with_paradigm(Present, ["voy", "vas", "va", "vamos", "vais", "van"])
            .with_paradigm(Preterite, ["fui", "fuiste", "fue", "fuimos", "fuisteis", "fueron"])
            .with_paradigm(Future, ["iré", "irás", "irá", "iremos", "iréis", "irán"]),
        VerbEntry::new("venir", Es, Irregular)
            .with_translation("to come")
            .with_paradigm(Present, ["vengo", "vienes", "viene", "venimos", "venís", "vienen"])
            .with_paradigm(
                Preterite,
                ["vine", "viniste", "vino", "vinimos", "vinisteis", "vinieron"],
            )
            .with_paradigm(
                Future,
                ["vendré", "vendrás", "vendrá", "vendremos", "vendréis", "vendrán"],
            ),
        // e -> ie
        VerbEntry::new("preferir", Es, StemChanging)
            .with_translation("to prefer")
            .with_paradigm(
                Present,
                ["prefiero", "prefieres", "prefiere", "preferimos", "preferís", "prefieren"],
            )
            .with_paradigm(
                Preterite,
                ["preferí", "preferiste", "prefirió", "preferimos", "preferisteis", "prefirieron"],
            )
            .with_paradigm(
                Future,
                [
                    "preferiré",
                    "preferirás",
                    "preferirá",
                    "preferiremos",
                    "preferiréis",
                    "preferirán",
                ],
            ),
        // o -> ue
        VerbEntry::new("poder", Es, StemChanging)
            .with_translation("to be able to")
            .with_paradigm(Present, ["puedo", "puedes", "puede", "podemos", "podéis", "pueden"])
            .with_paradigm(
                Preterite,
                ["pude", "pudiste", "pudo", "pudimos", "pudisteis", "pudieron"],
            )
            .with_paradigm(Future, ["podré", "podrás", "podrá", "podremos", "podréis", "podrán"]),
        // e -> i
        VerbEntry::new("pedir", Es, StemChanging)
            .with_translation("to ask for")
            .with_paradigm(Present, ["pido", "pides", "pide", "pedimos", "pedís", "piden"])
            .with_paradigm(
                Preterite,
                ["pedí", "pediste", "pidió", "pedimos", "pedisteis", "pidieron"],
            )
            .with_paradigm(
                Future,
                ["pediré", "pedirás", "pedirá", "pediremos", "pediréis", "pedirán"],
            ),
        // Impersonal: third person singular only.
        VerbEntry::new("llover", Es, StemChanging)
            .with_translation("to rain")
            .with_form(Present, Person::ThirdSingular, "llueve")
            .with_form(Preterite, Person::ThirdSingular, "llovió")
            .with_form(Future, Person::ThirdSingular, "lloverá")
            .restricted_to(&[Person::ThirdSingular]),
    ]
}

fn french() -> Vec<VerbEntry> {
    vec![
        VerbEntry::new("parler", Fr, Regular).with_translation("to speak"),
        VerbEntry::new("finir", Fr, Regular).with_translation("to finish"),
        VerbEntry::new("vendre", Fr, Regular).with_translation("to sell"),
        VerbEntry::new("être", Fr, Irregular)
            .with_translation("to be")
            .with_paradigm(Present, ["suis", "es", "est", "sommes", "êtes", "sont"])
            .with_paradigm(Future, ["serai", "seras", "sera", "serons", "serez", "seront"]),
        VerbEntry::new("avoir", Fr, Irregular)
            .with_translation("to have")
            .with_paradigm(Present, ["ai", "as", "a", "avons", "avez", "ont"])
            .with_paradigm(Future, ["aurai", "auras", "aura", "aurons", "aurez", "auront"]),
        VerbEntry::new("aller", Fr, Irregular)
            .with_translation("to go")
            .with_paradigm(Present, ["vais", "vas", "va", "allons", "allez", "vont"])
            .with_paradigm(Future, ["irai", "iras", "ira", "irons", "irez", "iront"]),
        VerbEntry::new("faire", Fr, Irregular)
            .with_translation("to do")
            .with_paradigm(Present, ["fais", "fais", "fait", "faisons", "faites", "font"])
            .with_paradigm(Future, ["ferai", "feras", "fera", "ferons", "ferez", "feront"]),
        VerbEntry::new("pleuvoir", Fr, Irregular)
            .with_translation("to rain")
            .with_form(Present, Person::ThirdSingular, "pleut")
            .with_form(Future, Person::ThirdSingular, "pleuvra")
            .restricted_to(&[Person::ThirdSingular]),
    ]
}

fn german() -> Vec<VerbEntry> {
    vec![
        VerbEntry::new("spielen", De, Regular).with_translation("to play"),
        VerbEntry::new("wohnen", De, Regular).with_translation("to live"),
        VerbEntry::new("arbeiten", De, Regular).with_translation("to work"),
        VerbEntry::new("tanzen", De, Regular).with_translation("to dance"),
        VerbEntry::new("sein", De, Irregular)
            .with_translation("to be")
            .with_paradigm(Present, ["bin", "bist", "ist", "sind", "seid", "sind"]),
        VerbEntry::new("haben", De, Irregular)
            .with_translation("to have")
            .with_paradigm(Present, ["habe", "hast", "hat", "haben", "habt", "haben"]),
        VerbEntry::new("werden", De, Irregular)
            .with_translation("to become")
            .with_paradigm(Present, ["werde", "wirst", "wird", "werden", "werdet", "werden"]),
        VerbEntry::new("regnen", De, Regular)
            .with_translation("to rain")
            .with_form(Present, Person::ThirdSingular, "regnet")
            .restricted_to(&[Person::ThirdSingular]),
    ]
}
