//! Clinical research schema (eight modules, Lancet-style structured abstract).

use super::{ModuleDef, ModuleSchema, Position};
use crate::models::PaperType;

const MODULES: &[ModuleDef] = &[
    ModuleDef {
        key: "background",
        label: "Background",
        aliases: &["background", "introduction", "context", "背景", "研究背景", "引言"],
        triggers: &[
            "remains unclear",
            "is unknown",
            "little is known",
            "is a leading cause",
            "is associated with",
            "prevalence of",
        ],
        position: Some(Position::Leading),
        max_chars: 500,
    },
    ModuleDef {
        key: "objective",
        label: "Objective",
        aliases: &["objective", "objectives", "aim", "aims", "purpose", "目的", "研究目的"],
        triggers: &[
            "to evaluate",
            "to investigate",
            "to assess",
            "to determine",
            "to compare",
            "we aimed",
            "this study aimed",
            "旨在",
        ],
        position: None,
        max_chars: 300,
    },
    ModuleDef {
        key: "methods",
        label: "Methods",
        aliases: &[
            "methods",
            "methodology",
            "materials and methods",
            "study design",
            "design",
            "方法",
            "研究方法",
        ],
        triggers: &[
            "we conducted",
            "this was a",
            "randomized controlled trial",
            "randomised controlled trial",
            "double-blind",
            "cohort study",
            "retrospective",
            "prospective",
            "随机",
        ],
        position: None,
        max_chars: 500,
    },
    ModuleDef {
        key: "participants",
        label: "Participants",
        aliases: &[
            "participants",
            "patients",
            "subjects",
            "study population",
            "setting and participants",
            "研究对象",
            "受试者",
        ],
        triggers: &[
            "were enrolled",
            "were recruited",
            "were randomly assigned",
            "were randomized",
            "patients with",
            "participants",
            "aged",
            "入组",
        ],
        position: None,
        max_chars: 400,
    },
    ModuleDef {
        key: "intervention",
        label: "Intervention",
        aliases: &["intervention", "interventions", "treatment", "干预", "干预措施"],
        triggers: &[
            "intervention group",
            "control group",
            "were assigned to",
            "received",
            "placebo",
            "mg",
            "给予",
        ],
        position: None,
        max_chars: 400,
    },
    ModuleDef {
        key: "outcomes",
        label: "Outcomes",
        aliases: &[
            "outcomes",
            "main outcomes and measures",
            "outcome measures",
            "primary outcome",
            "endpoints",
            "结局指标",
            "主要结局",
        ],
        triggers: &[
            "primary outcome",
            "primary endpoint",
            "secondary outcome",
            "secondary endpoint",
            "was measured",
            "主要终点",
        ],
        position: None,
        max_chars: 400,
    },
    ModuleDef {
        key: "results",
        label: "Results",
        aliases: &["results", "findings", "结果"],
        triggers: &[
            "we found",
            "showed",
            "p<",
            "p <",
            "p =",
            "hazard ratio",
            "odds ratio",
            "95% ci",
            "significantly",
            "显著",
        ],
        position: None,
        max_chars: 600,
    },
    ModuleDef {
        key: "conclusion",
        label: "Conclusion",
        aliases: &["conclusion", "conclusions", "interpretation", "结论"],
        triggers: &[
            "in conclusion",
            "these findings",
            "we conclude",
            "suggest that",
            "support the use",
            "综上",
        ],
        position: Some(Position::Trailing),
        max_chars: 400,
    },
];

pub(super) fn schema() -> ModuleSchema {
    ModuleSchema::new(PaperType::ClinicalResearch, MODULES.to_vec())
}
