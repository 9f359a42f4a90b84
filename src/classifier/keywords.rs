//! Built-in keyword tables.
//!
//! Weights reflect how strongly a phrase points at one paper type: study
//! design phrases ("randomized controlled trial", "case report", "western
//! blot") carry 4-5, supporting vocabulary 2-3 and generic terms 1-1.5.
//! Every table mixes English and Chinese phrases.

pub(super) const CLINICAL_RESEARCH: &[(&str, f64)] = &[
    // study design
    ("randomized controlled trial", 5.0),
    ("randomised controlled trial", 5.0),
    ("clinical trial", 4.0),
    ("double-blind", 4.0),
    ("double blind", 4.0),
    ("placebo-controlled", 4.0),
    ("intention-to-treat", 4.0),
    ("cohort study", 3.5),
    ("randomly assigned", 3.5),
    ("case-control study", 3.5),
    ("cross-sectional", 3.0),
    ("multicenter", 3.0),
    ("multicentre", 3.0),
    ("randomized", 3.0),
    ("randomised", 3.0),
    ("cohort", 2.0),
    ("prospective", 2.0),
    ("retrospective", 2.0),
    // participants and intervention
    ("were enrolled", 2.5),
    ("participants", 2.0),
    ("placebo", 2.5),
    ("intervention group", 2.5),
    ("control group", 2.5),
    ("patients", 1.0),
    // outcomes and statistics
    ("primary endpoint", 3.0),
    ("primary outcome", 3.0),
    ("secondary outcome", 2.5),
    ("adverse events", 2.0),
    ("hazard ratio", 3.0),
    ("odds ratio", 2.5),
    ("confidence interval", 2.0),
    ("95% ci", 2.0),
    ("efficacy", 1.5),
    ("p<", 1.0),
    ("p <", 1.0),
    ("p =", 1.0),
    // Chinese
    ("随机对照试验", 5.0),
    ("临床试验", 4.0),
    ("双盲", 4.0),
    ("队列研究", 3.5),
    ("主要终点", 3.0),
    ("安慰剂", 2.5),
    ("入组", 2.5),
    ("受试者", 2.0),
];

pub(super) const CASE_REPORT: &[(&str, f64)] = &[
    ("case report", 5.0),
    ("case presentation", 4.5),
    ("we report a", 3.5),
    ("rare case", 3.5),
    ("we present a", 3.0),
    ("year-old", 3.0),
    ("chief complaint", 3.0),
    ("years old", 2.5),
    ("presented with", 2.5),
    ("complained of", 2.5),
    ("was admitted", 2.0),
    ("physical examination", 2.0),
    ("diagnosed with", 2.0),
    ("the patient", 1.5),
    // Chinese
    ("病例报告", 5.0),
    ("个案报道", 5.0),
    ("主诉", 3.0),
    ("入院", 2.0),
    ("患者", 1.5),
];

pub(super) const BASIC_RESEARCH: &[(&str, f64)] = &[
    ("western blot", 4.0),
    ("in vitro", 3.5),
    ("cell culture", 3.5),
    ("knockdown", 3.5),
    ("sirna", 3.5),
    ("crispr", 3.5),
    ("in vivo", 3.0),
    ("cell line", 3.0),
    ("knockout", 3.0),
    ("qpcr", 3.0),
    ("rt-pcr", 3.0),
    ("zebrafish", 3.0),
    ("phosphorylation", 3.0),
    ("immunofluorescence", 3.0),
    ("signaling pathway", 3.0),
    ("signalling pathway", 3.0),
    ("flow cytometry", 2.5),
    ("gene expression", 2.5),
    ("mice", 2.5),
    ("rats", 2.0),
    ("transcription", 2.0),
    ("mechanism", 2.0),
    ("molecular", 1.5),
    ("pathway", 1.5),
    ("protein", 1.5),
    // Chinese
    ("信号通路", 3.0),
    ("小鼠", 2.5),
    ("细胞", 2.0),
    ("机制", 2.0),
    ("蛋白", 1.5),
    ("基因", 1.5),
];
