//! Built-in configuration for student housing in Zaragoza.

use super::{Config, ListRef, Pattern, Vocabulary};

/// Several patterns only combine the first few housing types to keep the
/// output at a size a keyword planner accepts in one paste.
const CORE_TIPOS: usize = 4;

const TIPOS_VIVIENDA: &[&str] = &[
    "habitacion",
    "piso",
    "alquiler",
    "alojamiento",
    "residencia",
    "cuarto",
    "apartamento",
    "estudio",
];

const TARGETS: &[&str] = &[
    "estudiantes",
    "universitarios",
    "erasmus",
    "jovenes",
    "estudiante",
    "universitario",
];

const UBICACIONES: &[&str] = &["zaragoza", "unizar"];

const BARRIOS: &[&str] = &[
    "centro",
    "delicias",
    "actur",
    "las fuentes",
    "torrero",
    "san jose",
    "arrabal",
    "almozara",
    "romareda",
    "valdespartera",
    "parque goya",
    "casablanca",
    "miralbueno",
    "oliver",
    "la paz",
    "el tubo",
    "la magdalena",
    "san pablo",
    "miraflores",
    "ruiseñores",
    "montecanal",
];

const CAMPUS: &[&str] = &[
    "campus san francisco",
    "campus rio ebro",
    "plaza san francisco",
    "paraninfo",
];

const FACULTADES: &[&str] = &[
    "medicina",
    "derecho",
    "veterinaria",
    "economia",
    "ingenieros",
    "arquitectura",
    "enfermeria",
    "filosofia",
    "fisioterapia",
    "ciencias",
    "telecomunicaciones",
    "politecnica",
];

const PRECIOS: &[&str] = &[
    "barato",
    "barata",
    "economico",
    "economica",
    "200 euros",
    "250 euros",
    "300 euros",
    "350 euros",
    "400 euros",
];

const SERVICIOS: &[&str] = &[
    "gastos incluidos",
    "wifi incluido",
    "amueblado",
    "amueblada",
    "con baño privado",
    "exterior",
    "luminosa",
    "sin aval",
];

const TEMPORALIDAD: &[&str] = &[
    "septiembre",
    "curso academico",
    "enero",
    "verano",
    "mes a mes",
    "corta estancia",
    "temporal",
];

const ACCIONES: &[&str] = &["busco", "alquilar", "buscar", "encontrar"];

const ROOMMATES: &[&str] = &[
    "compañero de piso",
    "roommate",
    "roomie",
    "compartir piso",
    "piso compartido",
];

const PREGUNTAS: &[&str] = &[
    "donde vivir en zaragoza estudiante",
    "mejores barrios zaragoza estudiantes",
    "cuanto cuesta habitacion zaragoza",
    "cuanto cuesta vivir en zaragoza",
    "mejores zonas estudiantes zaragoza",
    "vida universitaria zaragoza",
    "coste vida estudiante zaragoza",
    "presupuesto estudiante zaragoza",
    "barrios seguros zaragoza",
    "transporte publico zaragoza universidad",
    "como llegar campus rio ebro",
    "como llegar campus san francisco",
    "residencia o piso zaragoza",
    "que es mejor residencia o piso",
    "ventajas piso compartido",
    "ventajas residencia universitaria",
    "consejos alquilar piso zaragoza",
    "errores alquilar habitacion",
    "estafas alquiler estudiantes",
    "como evitar estafa alquiler",
];

const ERASMUS: &[&str] = &[
    "erasmus zaragoza alojamiento",
    "erasmus zaragoza housing",
    "student housing zaragoza",
    "room for rent zaragoza",
    "flat share zaragoza",
    "accommodation zaragoza university",
    "student apartment zaragoza",
    "cheap room zaragoza",
    "furnished room zaragoza",
    "international students zaragoza",
    "exchange student zaragoza",
    "semester abroad zaragoza",
    "study abroad zaragoza accommodation",
];

const COMPETIDORES: &[&str] = &[
    "idealista habitaciones zaragoza",
    "fotocasa pisos estudiantes zaragoza",
    "milanuncios habitacion zaragoza",
    "badi zaragoza",
    "spotahome zaragoza",
    "uniplaces zaragoza",
    "housinganywhere zaragoza",
    "alternativa idealista",
    "mejor que badi",
    "app pisos estudiantes",
];

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn combine(name: &str, lists: Vec<ListRef>, templates: &[&str]) -> Pattern {
    Pattern {
        name: name.to_string(),
        lists,
        templates: owned(templates),
        phrases: vec![],
    }
}

fn literal(name: &str, phrases: &[&str]) -> Pattern {
    Pattern {
        name: name.to_string(),
        lists: vec![],
        templates: vec![],
        phrases: owned(phrases),
    }
}

fn core_tipo() -> ListRef {
    ListRef::new("tipos_vivienda", "tipo").limit(CORE_TIPOS)
}

pub(super) fn zaragoza() -> Config {
    let vocabulary: Vocabulary = [
        ("tipos_vivienda", TIPOS_VIVIENDA),
        ("targets", TARGETS),
        ("ubicaciones", UBICACIONES),
        ("barrios", BARRIOS),
        ("campus", CAMPUS),
        ("facultades", FACULTADES),
        ("precios", PRECIOS),
        ("servicios", SERVICIOS),
        ("temporalidad", TEMPORALIDAD),
        ("acciones", ACCIONES),
        ("roommates", ROOMMATES),
    ]
    .into_iter()
    .map(|(name, words)| (name.to_string(), owned(words)))
    .collect();

    let patterns = vec![
        combine(
            "tipo_target_ubicacion",
            vec![
                ListRef::new("tipos_vivienda", "tipo"),
                ListRef::new("targets", "target"),
                ListRef::new("ubicaciones", "ubicacion"),
            ],
            &["{tipo} {target} {ubicacion}", "{tipo} {ubicacion} {target}"],
        ),
        combine(
            "tipo_barrio",
            vec![core_tipo(), ListRef::new("barrios", "barrio")],
            &[
                "{tipo} {barrio} zaragoza",
                "{tipo} zaragoza {barrio}",
                "{tipo} {barrio} estudiantes",
            ],
        ),
        combine(
            "tipo_campus",
            vec![core_tipo(), ListRef::new("campus", "campus")],
            &["{tipo} {campus}", "{tipo} cerca {campus}"],
        ),
        combine(
            "tipo_facultad",
            vec![core_tipo(), ListRef::new("facultades", "facultad")],
            &[
                "{tipo} {facultad} zaragoza",
                "{tipo} {facultad} unizar",
                "{tipo} cerca {facultad} zaragoza",
            ],
        ),
        combine(
            "tipo_precio",
            vec![core_tipo(), ListRef::new("precios", "precio")],
            &[
                "{tipo} {precio} zaragoza",
                "{tipo} zaragoza {precio}",
                "{tipo} {precio} estudiantes zaragoza",
            ],
        ),
        combine(
            "tipo_servicio",
            vec![core_tipo(), ListRef::new("servicios", "servicio")],
            &["{tipo} {servicio} zaragoza", "{tipo} zaragoza {servicio}"],
        ),
        combine(
            "tipo_temporada",
            vec![core_tipo(), ListRef::new("temporalidad", "temp")],
            &["{tipo} {temp} zaragoza", "alquiler {tipo} {temp} zaragoza"],
        ),
        combine(
            "accion_tipo",
            vec![ListRef::new("acciones", "accion"), core_tipo()],
            &["{accion} {tipo} zaragoza", "{accion} {tipo} estudiantes zaragoza"],
        ),
        combine(
            "accion_roommate",
            vec![
                ListRef::new("acciones", "accion"),
                ListRef::new("roommates", "roommate"),
            ],
            &["{accion} {roommate} zaragoza"],
        ),
        combine(
            "roommate",
            vec![ListRef::new("roommates", "roommate")],
            &[
                "{roommate} zaragoza",
                "{roommate} estudiantes zaragoza",
                "{roommate} zaragoza estudiantes",
            ],
        ),
        literal("preguntas", PREGUNTAS),
        literal("erasmus", ERASMUS),
        literal("competidores", COMPETIDORES),
    ];

    Config {
        vocabulary,
        patterns,
    }
}
