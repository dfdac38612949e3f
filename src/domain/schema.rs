//! Static per-entity configuration: backend paths, template asset, labels
//! and grid columns for each of the seven managed record types.

use crate::domain::model::TemplateDownload;
use crate::utils::error::{AdminError, Result};
use std::fmt;
use std::str::FromStr;

pub const TEMPLATES_PREFIX: &str = "/templates";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Centro,
    Servicio,
    Especialidad,
    IndicadorMedioambiental,
    Paciente,
    Costo,
    Visita,
}

impl EntityKind {
    /// Sidebar order of the dashboard.
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Centro,
        EntityKind::Costo,
        EntityKind::Servicio,
        EntityKind::IndicadorMedioambiental,
        EntityKind::Especialidad,
        EntityKind::Paciente,
        EntityKind::Visita,
    ];

    pub fn spec(self) -> &'static EntitySpec {
        match self {
            EntityKind::Centro => &CENTRO,
            EntityKind::Servicio => &SERVICIO,
            EntityKind::Especialidad => &ESPECIALIDAD,
            EntityKind::IndicadorMedioambiental => &INDICADOR_MEDIOAMBIENTAL,
            EntityKind::Paciente => &PACIENTE,
            EntityKind::Costo => &COSTO,
            EntityKind::Visita => &VISITA,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.spec().upload_table
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = AdminError;

    /// 接受上傳表名、集合路徑或常見別名
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        EntityKind::ALL
            .into_iter()
            .find(|kind| {
                let spec = kind.spec();
                normalized == spec.upload_table
                    || normalized == spec.collection_path.replace('-', "_")
                    || spec.aliases.contains(&normalized.as_str())
            })
            .ok_or_else(|| AdminError::UnknownEntity {
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub field: &'static str,
    pub label: &'static str,
    pub min_width: u16,
    pub kind: ColumnKind,
    pub is_delete_action: bool,
}

const fn text(field: &'static str, label: &'static str, min_width: u16) -> ColumnDef {
    ColumnDef {
        field,
        label,
        min_width,
        kind: ColumnKind::Text,
        is_delete_action: false,
    }
}

const fn number(field: &'static str, label: &'static str, min_width: u16) -> ColumnDef {
    ColumnDef {
        kind: ColumnKind::Number,
        ..text(field, label, min_width)
    }
}

const fn boolean(field: &'static str, label: &'static str, min_width: u16) -> ColumnDef {
    ColumnDef {
        kind: ColumnKind::Boolean,
        ..text(field, label, min_width)
    }
}

const ID: ColumnDef = text("id", "ID", 100);

const DELETE_ACTION: ColumnDef = ColumnDef {
    field: "actions",
    label: "",
    min_width: 50,
    kind: ColumnKind::Text,
    is_delete_action: true,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masculine,
    Feminine,
}

/// Spanish nouns used to build notification texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityLabels {
    pub plural: &'static str,
    pub singular: &'static str,
    pub gender: Gender,
}

impl EntityLabels {
    pub fn definite_plural(&self) -> String {
        match self.gender {
            Gender::Masculine => format!("los {}", self.plural),
            Gender::Feminine => format!("las {}", self.plural),
        }
    }

    pub fn definite_singular(&self) -> String {
        match self.gender {
            Gender::Masculine => format!("el {}", self.singular),
            Gender::Feminine => format!("la {}", self.singular),
        }
    }

    /// Participle agreeing with the noun, e.g. `obtenidos` / `obtenidas`.
    pub fn agree(&self, stem: &str, plural: bool) -> String {
        let ending = match (self.gender, plural) {
            (Gender::Masculine, false) => "o",
            (Gender::Masculine, true) => "os",
            (Gender::Feminine, false) => "a",
            (Gender::Feminine, true) => "as",
        };
        format!("{}{}", stem, ending)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct EntitySpec {
    pub kind: EntityKind,
    pub collection_path: &'static str,
    pub upload_table: &'static str,
    pub template_file: &'static str,
    pub title: &'static str,
    pub labels: EntityLabels,
    pub aliases: &'static [&'static str],
    pub columns: &'static [ColumnDef],
}

impl EntitySpec {
    pub fn template(&self) -> TemplateDownload {
        TemplateDownload {
            href: format!("{}/{}", TEMPLATES_PREFIX, self.template_file),
            file_name: self.template_file.to_string(),
        }
    }

    /// Columns shown as data, i.e. without the delete action.
    pub fn data_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| !c.is_delete_action)
    }
}

pub static CENTRO: EntitySpec = EntitySpec {
    kind: EntityKind::Centro,
    collection_path: "centros_de_salud",
    upload_table: "centro",
    template_file: "centro_template.xlsx",
    title: "Gestión de Centros de Salud",
    labels: EntityLabels {
        plural: "centros de salud",
        singular: "centro de salud",
        gender: Gender::Masculine,
    },
    aliases: &["centros", "centros_salud"],
    columns: &[
        ID,
        text("nombre", "Nombre", 250),
        text("direccion", "Dirección", 250),
        text("ubicacion", "Ubicación", 200),
        text("telefono", "Teléfono", 150),
        text("email", "Email", 200),
        number("capacidad_pacientes", "Capacidad", 120),
        number("numero_empleados", "Empleados", 120),
        boolean("servicios_urgencias", "Urgencias", 150),
        text("pagina_web", "Página Web", 200),
        text("comentarios", "Comentarios", 300),
        text("estado_centro", "Estado", 150),
        text("tipo_propiedad", "Propiedad", 150),
        DELETE_ACTION,
    ],
};

pub static SERVICIO: EntitySpec = EntitySpec {
    kind: EntityKind::Servicio,
    collection_path: "servicios",
    upload_table: "servicio",
    template_file: "servicio_template.xlsx",
    title: "Gestión de Servicios",
    labels: EntityLabels {
        plural: "servicios",
        singular: "servicio",
        gender: Gender::Masculine,
    },
    aliases: &[],
    columns: &[
        ID,
        text("nombre", "Nombre", 200),
        text("descripcion", "Descripción", 300),
        text("especialidad_id", "Especialidad ID", 150),
        DELETE_ACTION,
    ],
};

pub static ESPECIALIDAD: EntitySpec = EntitySpec {
    kind: EntityKind::Especialidad,
    collection_path: "especialidades",
    upload_table: "especialidad",
    template_file: "especialidad_template.xlsx",
    title: "Gestión de Especialidades",
    labels: EntityLabels {
        plural: "especialidades",
        singular: "especialidad",
        gender: Gender::Feminine,
    },
    aliases: &[],
    columns: &[
        ID,
        text("nombre", "Nombre", 200),
        text("descripcion", "Descripción", 300),
        DELETE_ACTION,
    ],
};

pub static INDICADOR_MEDIOAMBIENTAL: EntitySpec = EntitySpec {
    kind: EntityKind::IndicadorMedioambiental,
    collection_path: "indicadores-medioambientales",
    upload_table: "indicador_medioambiental",
    template_file: "ind_medioam_template.xlsx",
    title: "Gestión de Indicadores Medioambientales",
    labels: EntityLabels {
        plural: "indicadores medioambientales",
        singular: "indicador medioambiental",
        gender: Gender::Masculine,
    },
    aliases: &["indicador", "indicadores", "ind_medioam"],
    columns: &[
        ID,
        text("centro_id", "Centro ID", 150),
        number("consumo_energia", "Consumo Energía", 150),
        number("consumo_agua", "Consumo Agua", 150),
        number("emisiones_co2", "Emisiones CO2", 150),
        number("residuos_generados", "Residuos Generados", 150),
        number("residuos_reciclados", "Residuos Reciclados", 150),
        text("uso_energias_renovables", "Energías Renovables", 150),
        number("superficie_areas_verdes", "Áreas Verdes", 150),
        text("uso_transporte_sostenible", "Transporte Sostenible", 150),
        number("consumo_papel", "Consumo Papel", 150),
        number("temperatura_media", "Temperatura Media", 150),
        number("costos_sostenibilidad", "Costos Sostenibilidad", 150),
        text("fecha_registro", "Fecha Registro", 150),
        number("consumo_energia_renovable", "Consumo Energía Renovable", 150),
        number(
            "consumo_energia_no_renovable",
            "Consumo Energía No Renovable",
            150,
        ),
        DELETE_ACTION,
    ],
};

pub static PACIENTE: EntitySpec = EntitySpec {
    kind: EntityKind::Paciente,
    collection_path: "pacientes",
    upload_table: "paciente",
    template_file: "paciente_template.xlsx",
    title: "Gestión de Pacientes",
    labels: EntityLabels {
        plural: "pacientes",
        singular: "paciente",
        gender: Gender::Masculine,
    },
    aliases: &[],
    columns: &[
        ID,
        text("nombre", "Nombre", 150),
        text("apellido", "Apellido", 150),
        number("edad", "Edad", 100),
        text("genero", "Género", 150),
        text("pais_origen_id", "País de Origen ID", 150),
        text("fecha_registro", "Fecha de Registro", 150),
        text("ciudad", "Ciudad", 150),
        text("region", "Región", 150),
        DELETE_ACTION,
    ],
};

pub static COSTO: EntitySpec = EntitySpec {
    kind: EntityKind::Costo,
    collection_path: "costos",
    upload_table: "costo",
    template_file: "costo_template.xlsx",
    title: "Gestión de Costos",
    labels: EntityLabels {
        plural: "costos",
        singular: "costo",
        gender: Gender::Masculine,
    },
    aliases: &[],
    columns: &[
        ID,
        text("centro_id", "Centro ID", 150),
        text("servicio_id", "Servicio ID", 150),
        number("precio", "Precio", 120),
        text("moneda", "Moneda", 100),
        text("fecha_actualizacion", "Fecha Actualización", 150),
        DELETE_ACTION,
    ],
};

pub static VISITA: EntitySpec = EntitySpec {
    kind: EntityKind::Visita,
    collection_path: "visitas",
    upload_table: "visita",
    template_file: "visita_template.xlsx",
    title: "Gestión de Visitas",
    labels: EntityLabels {
        plural: "visitas",
        singular: "visita",
        gender: Gender::Feminine,
    },
    aliases: &[],
    columns: &[
        ID,
        text("paciente_id", "Paciente ID", 150),
        text("centro_id", "Centro ID", 150),
        text("especialidad_id", "Especialidad ID", 150),
        text("servicio_id", "Servicio ID", 150),
        text("fecha_visita", "Fecha Visita", 150),
        text("intermediario_id", "Intermediario ID", 150),
        DELETE_ACTION,
    ],
};
