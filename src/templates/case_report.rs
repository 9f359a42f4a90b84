//! Case report schema (five modules, Blood-style case structure).

use super::{ModuleDef, ModuleSchema, Position};
use crate::models::PaperType;

const MODULES: &[ModuleDef] = &[
    ModuleDef {
        key: "case_summary",
        label: "Case Summary",
        aliases: &[
            "case report",
            "case presentation",
            "case summary",
            "case description",
            "病例概述",
            "病例摘要",
            "病例报告",
        ],
        triggers: &["we report", "we present", "year-old", "years old", "this case", "岁"],
        position: Some(Position::Leading),
        max_chars: 500,
    },
    ModuleDef {
        key: "clinical_presentation",
        label: "Clinical Presentation",
        aliases: &[
            "clinical presentation",
            "presentation",
            "clinical findings",
            "history",
            "临床表现",
            "主诉",
            "现病史",
        ],
        triggers: &[
            "presented with",
            "complained of",
            "chief complaint",
            "was admitted",
            "history of",
            "symptoms",
        ],
        position: None,
        max_chars: 500,
    },
    ModuleDef {
        key: "diagnosis",
        label: "Diagnosis",
        aliases: &[
            "diagnosis",
            "diagnostic assessment",
            "investigations",
            "诊断",
            "诊断过程",
            "辅助检查",
        ],
        triggers: &[
            "diagnosed with",
            "diagnosis was",
            "confirmed by",
            "biopsy",
            "revealed",
            "imaging",
            "确诊",
        ],
        position: None,
        max_chars: 500,
    },
    ModuleDef {
        key: "treatment",
        label: "Treatment",
        aliases: &[
            "treatment",
            "management",
            "therapeutic intervention",
            "therapy",
            "治疗",
            "治疗方案",
        ],
        triggers: &[
            "treated with",
            "was started on",
            "underwent",
            "was initiated",
            "management included",
            "给予",
        ],
        position: None,
        max_chars: 500,
    },
    ModuleDef {
        key: "outcome",
        label: "Outcome",
        aliases: &[
            "outcome",
            "outcome and follow-up",
            "follow-up",
            "follow up",
            "治疗结果",
            "预后",
            "随访",
        ],
        triggers: &[
            "recovered",
            "recovery",
            "was discharged",
            "at follow-up",
            "improved",
            "died",
        ],
        position: Some(Position::Trailing),
        max_chars: 500,
    },
];

pub(super) fn schema() -> ModuleSchema {
    ModuleSchema::new(PaperType::CaseReport, MODULES.to_vec())
}
