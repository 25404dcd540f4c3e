//! Immutable vocabulary tables for the language tasks.
//!
//! Two data sets live here:
//!   - word categories (odd-one-out), each tagged with a difficulty tier 1..=3
//!   - a compact synonym/antonym dictionary (connect mode)
//!
//! The compact dictionary is expanded into a word table plus a relation table
//! exactly once, when `Lexicon::builtin()` is called at startup. The resulting
//! value is shared read-only (behind an `Arc`) with every generator call.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
  Synonym,
  Antonym,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
  Adj,
  Verb,
  Noun,
}

use PartOfSpeech::{Adj, Noun, Verb};

/// A named word group used by odd-one-out.
#[derive(Debug)]
pub struct WordCategory {
  pub key: &'static str,
  pub tier: u8,
  pub words: &'static [&'static str],
}

impl WordCategory {
  pub fn contains(&self, word: &str) -> bool {
    self.words.iter().any(|w| *w == word)
  }
}

/// Source row of the compact dictionary.
struct CompactWord {
  text: &'static str,
  tier: u8,
  pos: PartOfSpeech,
  syns: &'static [&'static str],
  ants: &'static [&'static str],
}

const fn w(
  text: &'static str,
  tier: u8,
  pos: PartOfSpeech,
  syns: &'static [&'static str],
  ants: &'static [&'static str],
) -> CompactWord {
  CompactWord { text, tier, pos, syns, ants }
}

/// Tier 1 is concrete and visual, tier 2 everyday/functional, tier 3 abstract.
static CATEGORIES: &[WordCategory] = &[
  WordCategory { key: "ANIMALS", tier: 1, words: &["Katze", "Hund", "Löwe", "Tiger", "Bär", "Wolf", "Fuchs", "Hase", "Maus", "Pferd", "Kuh", "Schwein", "Schaf", "Elefant", "Giraffe", "Affe"] },
  WordCategory { key: "FRUITS", tier: 1, words: &["Apfel", "Banane", "Orange", "Traube", "Zitrone", "Birne", "Pfirsich", "Kirsche", "Beere", "Melone", "Kiwi", "Ananas"] },
  WordCategory { key: "COLORS", tier: 1, words: &["Rot", "Blau", "Grün", "Gelb", "Pink", "Lila", "Orange", "Schwarz", "Weiß", "Grau", "Braun", "Türkis", "Gold", "Silber"] },
  WordCategory { key: "FURNITURE", tier: 1, words: &["Stuhl", "Tisch", "Bett", "Sofa", "Schreibtisch", "Lampe", "Teppich", "Regal", "Schrank", "Sessel", "Hocker"] },
  WordCategory { key: "CLOTHES", tier: 1, words: &["Hemd", "Hose", "Schuh", "Hut", "Mantel", "Socke", "Kleid", "Rock", "Jacke", "Handschuh", "Schal", "Mütze"] },
  WordCategory { key: "VEHICLES", tier: 2, words: &["Auto", "Bus", "LKW", "Fahrrad", "Zug", "Flugzeug", "Boot", "Schiff", "Taxi", "Motorrad", "U-Bahn"] },
  WordCategory { key: "TOOLS", tier: 2, words: &["Hammer", "Säge", "Bohrer", "Zange", "Schraube", "Nagel", "Axt", "Feile", "Pinsel", "Schlüssel"] },
  WordCategory { key: "JOBS", tier: 2, words: &["Arzt", "Koch", "Pilot", "Maler", "Bäcker", "Bauer", "Polizist", "Richter", "Lehrer", "Anwalt", "Feuerwehrmann"] },
  WordCategory { key: "SPORTS", tier: 2, words: &["Fußball", "Tennis", "Golf", "Rugby", "Hockey", "Judo", "Yoga", "Schwimmen", "Laufen", "Boxen"] },
  WordCategory { key: "INSTRUMENTS", tier: 2, words: &["Klavier", "Gitarre", "Trommel", "Flöte", "Geige", "Bass", "Harfe", "Trompete", "Saxophon"] },
  WordCategory { key: "EMOTIONS", tier: 3, words: &["Glück", "Trauer", "Wut", "Angst", "Freude", "Liebe", "Hass", "Hoffnung", "Neid", "Stolz", "Scham", "Mut"] },
  WordCategory { key: "MATH_TERMS", tier: 3, words: &["Plus", "Minus", "Summe", "Faktor", "Graph", "Linie", "Fläche", "Wurzel", "Teiler", "Bruch"] },
  WordCategory { key: "WEATHER", tier: 3, words: &["Regen", "Schnee", "Wind", "Sturm", "Wolke", "Hagel", "Nebel", "Hitze", "Frost", "Donner", "Blitz"] },
  WordCategory { key: "PLANETS", tier: 3, words: &["Erde", "Mars", "Venus", "Jupiter", "Saturn", "Pluto", "Mond", "Sonne", "Stern", "Komet"] },
  WordCategory { key: "METALS", tier: 3, words: &["Gold", "Silber", "Eisen", "Stahl", "Kupfer", "Zink", "Blei", "Zinn", "Messing", "Bronze", "Platin"] },
];

static COMPACT_WORDS: &[CompactWord] = &[
  // ADJECTIVES (Eigenschaften)
  // Basics (Level 1)
  w("gut", 1, Adj, &["toll", "super", "prima", "fein"], &["schlecht", "böse", "mies", "übel"]),
  w("schlecht", 1, Adj, &["mies", "übel", "furchtbar"], &["gut", "toll", "super"]),
  w("groß", 1, Adj, &["riesig", "gigantisch", "hoch"], &["klein", "winzig", "niedrig"]),
  w("klein", 1, Adj, &["winzig", "zwergenhaft", "gering"], &["groß", "riesig"]),
  w("schnell", 1, Adj, &["rasch", "flink", "zügig"], &["langsam", "träge"]),
  w("langsam", 1, Adj, &["träge", "gemächlich"], &["schnell", "rasant"]),
  w("heiß", 1, Adj, &["kochend", "warm", "brennend"], &["kalt", "eisig", "kühl"]),
  w("kalt", 1, Adj, &["eisig", "kühl", "frostig"], &["heiß", "warm"]),
  w("neu", 1, Adj, &["aktuell", "frisch", "modern"], &["alt", "antik", "veraltet"]),
  w("alt", 1, Adj, &["betagt", "antik", "historisch"], &["neu", "jung", "modern"]),
  w("jung", 1, Adj, &["frisch", "jugendlich"], &["alt", "senior"]),
  w("laut", 1, Adj, &["lärmend", "geräuschvoll"], &["leise", "ruhig", "still"]),
  w("leise", 1, Adj, &["ruhig", "still", "lautlos"], &["laut", "krachig"]),
  w("hell", 1, Adj, &["leuchtend", "strahlend", "klar"], &["dunkel", "finster"]),
  w("dunkel", 1, Adj, &["finster", "schwarz", "düster"], &["hell", "licht"]),
  w("teuer", 1, Adj, &["kostspielig", "wertvoll"], &["billig", "günstig"]),
  w("billig", 1, Adj, &["günstig", "preiswert"], &["teuer", "kostenintensiv"]),
  w("reich", 1, Adj, &["vermögend", "wohlhabend"], &["arm", "bedürftig"]),
  w("arm", 1, Adj, &["bedürftig", "mittellos"], &["reich", "vermögend"]),
  w("schwer", 1, Adj, &["gewichtig", "mühsam", "kompliziert"], &["leicht", "einfach"]),
  w("leicht", 1, Adj, &["federleicht", "einfach", "simpel"], &["schwer", "kompliziert"]),
  w("hart", 1, Adj, &["fest", "steinern", "zäh"], &["weich", "zart"]),
  w("weich", 1, Adj, &["zart", "flauschig", "sanft"], &["hart", "rau", "fest"]),
  w("nass", 1, Adj, &["feucht", "durchnässt"], &["trocken", "dürr"]),
  w("trocken", 1, Adj, &["dürr", "ausgetrocknet"], &["nass", "feucht"]),
  w("voll", 1, Adj, &["gefüllt", "besetzt"], &["leer", "hohl"]),
  w("leer", 1, Adj, &["hohl", "unbesetzt", "nichtig"], &["voll", "gefüllt"]),
  // Intermediate (Level 2)
  w("klug", 2, Adj, &["schlau", "intelligent", "gewitzt"], &["dumm", "blöd", "töricht"]),
  w("dumm", 2, Adj, &["blöd", "töricht", "unwissend"], &["klug", "schlau", "intelligent"]),
  w("mutig", 2, Adj, &["tapfer", "kühn", "heldenhaft"], &["feige", "ängstlich"]),
  w("feige", 2, Adj, &["ängstlich", "furchtsam"], &["mutig", "tapfer"]),
  w("glücklich", 2, Adj, &["froh", "fröhlich", "zufrieden"], &["traurig", "unglücklich"]),
  w("traurig", 2, Adj, &["betrübt", "niedergeschlagen"], &["glücklich", "froh"]),
  w("sauber", 2, Adj, &["rein", "gepflegt"], &["schmutzig", "dreckig"]),
  w("schmutzig", 2, Adj, &["dreckig", "unrein"], &["sauber", "rein"]),
  w("gesund", 2, Adj, &["fit", "wohlauf", "kräftig"], &["krank", "kränklich"]),
  w("krank", 2, Adj, &["unwohl", "leidend"], &["gesund", "fit"]),
  w("fleißig", 2, Adj, &["emsig", "arbeitsam"], &["faul", "träge"]),
  w("faul", 2, Adj, &["träge", "bequem"], &["fleißig", "aktiv"]),
  w("lustig", 2, Adj, &["witzig", "humorvoll", "komisch"], &["ernst", "langweilig"]),
  w("ernst", 2, Adj, &["seriös", "streng"], &["lustig", "albern"]),
  w("falsch", 2, Adj, &["inkorrekt", "fehlerhaft"], &["richtig", "korrekt", "wahr"]),
  w("richtig", 2, Adj, &["korrekt", "wahr", "stimmig"], &["falsch", "unwahr"]),
  w("breit", 2, Adj, &["weit", "ausgedehnt"], &["schmal", "eng"]),
  w("schmal", 2, Adj, &["eng", "dünn"], &["breit", "weit"]),
  // Advanced (Level 3)
  w("gigantisch", 3, Adj, &["riesig", "kolossal", "enorm"], &["winzig", "mikroskopisch"]),
  w("winzig", 3, Adj, &["klein", "mikroskopisch"], &["gigantisch", "riesig"]),
  w("komplex", 3, Adj, &["kompliziert", "vielschichtig"], &["simpel", "einfach"]),
  w("simpel", 3, Adj, &["einfach", "schlicht"], &["komplex", "aufwendig"]),
  w("modern", 3, Adj, &["aktuell", "zeitgemäß", "neuartig"], &["antik", "altmodisch"]),
  w("antik", 3, Adj, &["alt", "historisch", "vergangen"], &["modern", "futuristisch"]),
  w("global", 3, Adj, &["weltweit", "international"], &["lokal", "regional"]),
  w("lokal", 3, Adj, &["örtlich", "regional"], &["global", "international"]),
  w("permanent", 3, Adj, &["dauerhaft", "ständig"], &["temporär", "vorübergehend"]),
  w("temporär", 3, Adj, &["zeitweise", "befristet"], &["permanent", "ewig"]),
  w("optimistisch", 3, Adj, &["zuversichtlich", "hoffnungsvoll"], &["pessimistisch", "negativ"]),
  w("pessimistisch", 3, Adj, &["negativ", "trübsinnig"], &["optimistisch", "positiv"]),
  w("aggressiv", 3, Adj, &["angriffslustig", "streitbar"], &["friedlich", "sanft"]),
  w("friedlich", 3, Adj, &["ruhig", "harmonisch"], &["aggressiv", "kriegerisch"]),
  // VERBS (Tätigkeiten)
  // Level 1
  w("gehen", 1, Verb, &["laufen", "schreiten"], &["stehen", "bleiben"]),
  w("stehen", 1, Verb, &["verharren", "bleiben"], &["gehen", "laufen", "liegen"]),
  w("kommen", 1, Verb, &["eintreffen", "erscheinen"], &["gehen", "verlassen"]),
  w("essen", 1, Verb, &["speisen", "verzehren", "futtern"], &["hungern", "fasten"]),
  w("trinken", 1, Verb, &["schlürfen", "saufen"], &["verdursten"]),
  w("schlafen", 1, Verb, &["ruhen", "schlummern", "dösen"], &["wachen", "aufstehen"]),
  w("wachen", 1, Verb, &["aufpassen", "wach sein"], &["schlafen", "träumen"]),
  w("geben", 1, Verb, &["schenken", "reichen"], &["nehmen", "behalten"]),
  w("nehmen", 1, Verb, &["greifen", "erhalten"], &["geben", "schenken"]),
  w("lieben", 1, Verb, &["mögen", "verehren"], &["hassen", "verabscheuen"]),
  w("hassen", 1, Verb, &["verabscheuen", "nicht leiden"], &["lieben", "mögen"]),
  w("fragen", 1, Verb, &["erkundigen", "verhören"], &["antworten", "sagen"]),
  w("antworten", 1, Verb, &["erwidern", "reagieren"], &["fragen", "schweigen"]),
  // Level 2
  w("kaufen", 2, Verb, &["erwerben", "shoppen"], &["verkaufen"]),
  w("verkaufen", 2, Verb, &["veräußern", "anbieten"], &["kaufen", "erwerben"]),
  w("öffnen", 2, Verb, &["aufmachen", "aufschließen"], &["schließen", "zumachen"]),
  w("schließen", 2, Verb, &["zumachen", "beenden"], &["öffnen", "aufmachen"]),
  w("beginnen", 2, Verb, &["starten", "anfangen"], &["enden", "aufhören"]),
  w("enden", 2, Verb, &["aufhören", "abschließen"], &["beginnen", "starten"]),
  w("gewinnen", 2, Verb, &["siegen", "erfolgreich sein"], &["verlieren", "scheitern"]),
  w("verlieren", 2, Verb, &["scheitern", "einbüßen"], &["gewinnen", "siegen"]),
  w("lachen", 2, Verb, &["kichern", "grinsen"], &["weinen", "heulen"]),
  w("weinen", 2, Verb, &["heulen", "schluchzen", "jammern"], &["lachen", "freuen"]),
  w("suchen", 2, Verb, &["forschen", "fahnden"], &["finden", "entdecken"]),
  w("finden", 2, Verb, &["entdecken", "aufspüren"], &["suchen", "verlieren"]),
  w("bauen", 2, Verb, &["errichten", "konstruieren"], &["zerstören", "abreißen"]),
  w("zerstören", 2, Verb, &["kaputtmachen", "vernichten"], &["bauen", "reparieren"]),
  // Level 3
  w("erlauben", 3, Verb, &["gestatten", "genehmigen"], &["verbieten", "untersagen"]),
  w("verbieten", 3, Verb, &["untersagen", "sperren"], &["erlauben", "gestatten"]),
  w("steigen", 3, Verb, &["klettern", "zunehmen", "wachsen"], &["sinken", "fallen"]),
  w("sinken", 3, Verb, &["fallen", "abnehmen", "untergehen"], &["steigen", "zunehmen"]),
  w("beschützen", 3, Verb, &["verteidigen", "bewahren"], &["angreifen", "bedrohen"]),
  w("angreifen", 3, Verb, &["attackieren", "stürmen"], &["verteidigen", "schützen"]),
  w("flüstern", 3, Verb, &["tuscheln", "hauchen"], &["schreien", "brüllen"]),
  w("schreien", 3, Verb, &["brüllen", "rufen"], &["flüstern", "schweigen"]),
  // NOUNS (Dinge/Konzepte)
  // Level 1
  w("Mann", 1, Noun, &["Herr", "Kerl"], &["Frau", "Dame"]),
  w("Frau", 1, Noun, &["Dame", "Lady"], &["Mann", "Herr"]),
  w("Tag", 1, Noun, &["Tageszeit"], &["Nacht", "Dunkelheit"]),
  w("Nacht", 1, Noun, &["Dunkelheit"], &["Tag", "Morgen"]),
  w("Sommer", 1, Noun, &["Jahreszeit", "Hitze"], &["Winter", "Kälte"]),
  w("Winter", 1, Noun, &["Kälte", "Schneezeit"], &["Sommer", "Hitze"]),
  w("Freund", 1, Noun, &["Kumpel", "Partner", "Gefährte"], &["Feind", "Gegner"]),
  w("Feind", 1, Noun, &["Gegner", "Widersacher"], &["Freund", "Verbündeter"]),
  w("Morgen", 1, Noun, &["Früh", "Tagesbeginn"], &["Abend", "Nacht"]),
  w("Abend", 1, Noun, &["Dämmerung", "Spät"], &["Morgen", "Mittag"]),
  // Level 2
  w("Anfang", 2, Noun, &["Beginn", "Start", "Ursprung"], &["Ende", "Schluss"]),
  w("Ende", 2, Noun, &["Schluss", "Finale", "Abschluss"], &["Anfang", "Start"]),
  w("Frage", 2, Noun, &["Problem", "Rätsel"], &["Antwort", "Lösung"]),
  w("Antwort", 2, Noun, &["Lösung", "Ergebnis"], &["Frage", "Rätsel"]),
  w("Himmel", 2, Noun, &["Firmament", "Höhe"], &["Hölle", "Erde", "Boden"]),
  w("Hölle", 2, Noun, &["Unterwelt", "Fegefeuer"], &["Himmel", "Paradies"]),
  w("Sieg", 2, Noun, &["Gewinn", "Triumph", "Erfolg"], &["Niederlage", "Pleite"]),
  w("Niederlage", 2, Noun, &["Verlust", "Pleite", "Misserfolg"], &["Sieg", "Gewinn"]),
  w("Krieg", 2, Noun, &["Kampf", "Schlacht", "Konflikt"], &["Frieden", "Harmonie"]),
  w("Frieden", 2, Noun, &["Harmonie", "Stille", "Eintracht"], &["Krieg", "Streit"]),
  // Level 3
  w("Wahrheit", 3, Noun, &["Fakt", "Realität", "Echtheit"], &["Lüge", "Fiktion"]),
  w("Lüge", 3, Noun, &["Unwahrheit", "Täuschung"], &["Wahrheit", "Ehrlichkeit"]),
  w("Vorteil", 3, Noun, &["Nutzen", "Pluspunkt", "Bonus"], &["Nachteil", "Manko"]),
  w("Nachteil", 3, Noun, &["Schaden", "Minus", "Manko"], &["Vorteil", "Nutzen"]),
  w("Erfolg", 3, Noun, &["Gelingen", "Sieg"], &["Misserfolg", "Scheitern"]),
  w("Misserfolg", 3, Noun, &["Scheitern", "Fehlschlag"], &["Erfolg", "Gelingen"]),
  w("Theorie", 3, Noun, &["Annahme", "Hypothese", "Idee"], &["Praxis", "Realität"]),
  w("Praxis", 3, Noun, &["Anwendung", "Tat", "Ausführung"], &["Theorie", "Planung"]),
  w("Chaos", 3, Noun, &["Unordnung", "Durcheinander"], &["Ordnung", "Struktur"]),
  w("Ordnung", 3, Noun, &["Struktur", "Regelmäßigkeit"], &["Chaos", "Unordnung"]),
  w("Zukunft", 3, Noun, &["Kommendes", "Perspektive"], &["Vergangenheit", "Geschichte"]),
  w("Vergangenheit", 3, Noun, &["Geschichte", "Vorzeit"], &["Zukunft", "Gegenwart"]),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordId(u32);

impl fmt::Display for WordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "w_{}", self.0)
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WordEntry {
  pub id: WordId,
  pub text: &'static str,
  pub tier: u8,
  pub pos: PartOfSpeech,
}

/// Directed relation as listed in the dictionary; lookups treat it symmetrically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Relation {
  pub kind: RelationKind,
  pub target: WordId,
  pub partner: WordId,
}

/// Expanded word + relation tables.
#[derive(Debug)]
pub struct Lexicon {
  words: Vec<WordEntry>,
  relations: Vec<Relation>,
  categories: &'static [WordCategory],
}

impl Lexicon {
  /// Expand the built-in tables. Call once per process and share the result.
  pub fn builtin() -> Self {
    let lexicon = Self::expand(COMPACT_WORDS, CATEGORIES);
    info!(
      target: "engine",
      words = lexicon.words.len(),
      relations = lexicon.relations.len(),
      categories = lexicon.categories.len(),
      "Lexicon expanded"
    );
    lexicon
  }

  fn expand(compact: &'static [CompactWord], categories: &'static [WordCategory]) -> Self {
    let mut words = Vec::with_capacity(compact.len());
    let mut by_text = HashMap::with_capacity(compact.len());

    for (i, row) in compact.iter().enumerate() {
      let id = WordId(i as u32 + 1);
      by_text.insert(row.text, id);
      words.push(WordEntry { id, text: row.text, tier: row.tier, pos: row.pos });
    }

    // Only pairs where both sides are dictionary entries become relations.
    let mut relations = Vec::new();
    for row in compact {
      let Some(&target) = by_text.get(row.text) else { continue };
      for (kind, partners) in [(RelationKind::Synonym, row.syns), (RelationKind::Antonym, row.ants)] {
        for p in partners {
          if let Some(&partner) = by_text.get(p) {
            relations.push(Relation { kind, target, partner });
          }
        }
      }
    }

    Self { words, relations, categories }
  }

  pub fn words(&self) -> &[WordEntry] {
    &self.words
  }

  pub fn categories(&self) -> &'static [WordCategory] {
    self.categories
  }

  pub fn word(&self, id: WordId) -> Option<&WordEntry> {
    (id.0 as usize).checked_sub(1).and_then(|i| self.words.get(i))
  }

  #[cfg(test)]
  pub fn lookup(&self, text: &str) -> Option<&WordEntry> {
    self.words.iter().find(|w| w.text == text)
  }

  pub fn relations(&self, kind: RelationKind) -> impl Iterator<Item = &Relation> + '_ {
    self.relations.iter().filter(move |r| r.kind == kind)
  }

  /// Every word related to `id` by `kind`, in either direction.
  pub fn partners(&self, id: WordId, kind: RelationKind) -> impl Iterator<Item = WordId> + '_ {
    self.relations(kind).filter_map(move |r| {
      if r.target == id {
        Some(r.partner)
      } else if r.partner == id {
        Some(r.target)
      } else {
        None
      }
    })
  }
}
