//! End-to-end node runs over fixture files.

use std::fs;
use std::path::{Path, PathBuf};

use ardac_cli::pipeline::{FollowUpInputs, NodeInputs, RunContext, run_node};
use ardac_model::{NodeKind, ReleaseConfig, SubjectsType};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    ctx: RunContext,
    dcc: PathBuf,
}

impl Fixture {
    fn new(subjects: SubjectsType) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let templates = dir.path().join("templates");
        let dcc = dir.path().join("dcc");
        let output = dir.path().join("nodes");
        for path in [&templates, &dcc, &output] {
            fs::create_dir(path).unwrap();
        }
        write(
            &templates.join("submission_case_template.tsv"),
            "*type\tproject_id\t*submitter_id\t*studies.submitter_id\tcohort\tstudy_site\tindex_date\tvital_status\n",
        );
        write(
            &templates.join("submission_audit_template.tsv"),
            "*type\tproject_id\t*submitter_id\tcases.submitter_id\tauditnd\tadt0101\tadt0102\n",
        );
        write(
            &templates.join("submission_demographic_template.tsv"),
            "*type\tproject_id\t*submitter_id\t*cases.submitter_id\tgender\tvital_status\tyear_of_birth\tdays_to_death\n",
        );
        write(
            &templates.join("submission_follow_up_template.tsv"),
            "*type\tproject_id\t*submitter_id\tcases.submitter_id\tdemographics.submitter_id\t*days_to_follow_up\tvisit_day\tmeld_score\tchild_pugh_score\tweight\tbmi\tascites_culture\n",
        );

        write(
            &dcc.join("subjects.csv"),
            "usubjid,obs_arm,site,ALIVE,gender,brthdtc,dthdtc,scdat\n\
             101,Arm: AH,Site A ,Y,F,1970-05-01,,2020-01-01\n\
             102,Arm: HD,Site B,N,M,1980-02-01,2020-03-01,2020-01-01\n",
        );
        write(
            &dcc.join("audit.csv"),
            "usubjid,auditnd,adt0101,adt0102\n101,,1,2\n103,,3,4\n",
        );
        write(
            &dcc.join("liver.csv"),
            "usubjid,redcap_event_name,meld,cps\n101,Week 0,20,B\n101,Week 4,18,\n",
        );
        write(
            &dcc.join("med.csv"),
            "usubjid,redcap_event_name,ascyn\n101,Week 99,1\n",
        );
        write(
            &dcc.join("vitals.csv"),
            "usubjid,redcap_event_name,weight,bmi\n102,Week 0,70,22\n",
        );
        write(
            &dcc.join("soc.csv"),
            "usubjid,redcap_event_name,socisacnd___999\n101,Week 0,1\n",
        );

        let ctx = RunContext {
            subjects,
            release: ReleaseConfig::default(),
            templates_dir: templates,
            output_dir: output,
        };
        Self {
            _dir: dir,
            ctx,
            dcc,
        }
    }

    fn subjects(&self) -> NodeInputs {
        NodeInputs::Case {
            subjects_file: self.dcc.join("subjects.csv"),
        }
    }

    fn follow_up(&self) -> NodeInputs {
        NodeInputs::FollowUp(FollowUpInputs {
            liver_scores: self.dcc.join("liver.csv"),
            medical_info: self.dcc.join("med.csv"),
            vitals: self.dcc.join("vitals.csv"),
            standard_of_care: self.dcc.join("soc.csv"),
            soc_from_vitals: false,
        })
    }
}

fn write(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn case_node_keeps_every_subject() {
    let fixture = Fixture::new(SubjectsType::Observational);

    let summary = run_node(&fixture.ctx, &fixture.subjects()).unwrap();

    assert_eq!(summary.records, 2);
    assert_eq!(summary.qc_records, None);
    assert_eq!(summary.qc_file, None);
    assert!(
        summary
            .node_file
            .ends_with("case_obs_DCC_data_release_v2.0.0.tsv")
    );
    let lines = lines(&summary.node_file);
    assert_eq!(
        lines[1],
        "case\tARDaC-AlcHepNet\t101_obs\tobs\tAH\tSite A\tStudy Enrollment\talive"
    );
    assert_eq!(
        lines[2],
        "case\tARDaC-AlcHepNet\t102_obs\tobs\tHD\tSite B\tStudy Enrollment\tdead"
    );
}

#[test]
fn audit_reconciles_against_the_case_node() {
    let fixture = Fixture::new(SubjectsType::Observational);
    run_node(&fixture.ctx, &fixture.subjects()).unwrap();

    let audit = NodeInputs::Audit {
        audit_file: fixture.dcc.join("audit.csv"),
    };
    let summary = run_node(&fixture.ctx, &audit).unwrap();

    assert_eq!(summary.records, 1);
    assert_eq!(summary.qc_records, Some(1));
    assert_eq!(
        lines(&summary.node_file)[1],
        "audit\tARDaC-AlcHepNet\t101_obs_audit\t101_obs\t\t1\t2"
    );
    let qc_file = summary.qc_file.unwrap();
    assert!(qc_file.ends_with("audit_qc_obs_DCC_data_release_v2.0.0.tsv"));
    assert_eq!(
        lines(&qc_file),
        vec![
            "usubjid\t*submitter_id\tmissing_audit\tempty_audit".to_string(),
            "102\t102_obs\tY\t".to_string(),
        ]
    );
}

#[test]
fn quoted_blank_audit_row_is_empty() {
    let fixture = Fixture::new(SubjectsType::Observational);
    run_node(&fixture.ctx, &fixture.subjects()).unwrap();
    let audit_file = fixture.dcc.join("audit_blank.csv");
    write(
        &audit_file,
        "usubjid,auditnd,adt0101,adt0102\n\"101\",\"\",\"\",\"\"\n102,,,\n",
    );

    let summary = run_node(&fixture.ctx, &NodeInputs::Audit { audit_file }).unwrap();

    assert_eq!(summary.records, 0);
    assert_eq!(
        lines(&summary.qc_file.unwrap()),
        vec![
            "usubjid\t*submitter_id\tmissing_audit\tempty_audit".to_string(),
            "101\t101_obs_audit\t\tY".to_string(),
            "102\t102_obs_audit\t\tY".to_string(),
        ]
    );
}

#[test]
fn demographic_derives_dates_and_vital_status() {
    let fixture = Fixture::new(SubjectsType::Observational);
    run_node(&fixture.ctx, &fixture.subjects()).unwrap();

    let demographic = NodeInputs::Demographic {
        subjects_file: fixture.dcc.join("subjects.csv"),
    };
    let summary = run_node(&fixture.ctx, &demographic).unwrap();

    assert_eq!(summary.records, 2);
    assert_eq!(summary.qc_records, Some(0));
    let lines = lines(&summary.node_file);
    assert_eq!(
        lines[1],
        "demographic\tARDaC-AlcHepNet\t101_obs_demographic\t101_obs\tF\tAlive\t1970\t"
    );
    assert_eq!(
        lines[2],
        "demographic\tARDaC-AlcHepNet\t102_obs_demographic\t102_obs\tM\tDead\t1980\t60"
    );
}

#[test]
fn follow_up_keeps_visits_with_data() {
    let fixture = Fixture::new(SubjectsType::Observational);
    run_node(&fixture.ctx, &fixture.subjects()).unwrap();

    let summary = run_node(&fixture.ctx, &fixture.follow_up()).unwrap();

    assert_eq!(summary.records, 3);
    assert_eq!(summary.qc_records, Some(5));
    let node_lines = lines(&summary.node_file);
    assert_eq!(
        node_lines[1],
        "follow_up\tARDaC-AlcHepNet\t101_obs_0\t101_obs\t101_obs_demographic\t0\t0\t20\tB\t\t\t1"
    );
    assert_eq!(
        node_lines[2],
        "follow_up\tARDaC-AlcHepNet\t101_obs_28\t101_obs\t101_obs_demographic\t28\t28\t18\t\t\t\t"
    );
    assert_eq!(
        node_lines[3],
        "follow_up\tARDaC-AlcHepNet\t102_obs_0\t102_obs\t102_obs_demographic\t0\t0\t\t\t70\t22\t"
    );
    let qc = lines(&summary.qc_file.unwrap());
    assert_eq!(qc[0], "usubjid\t*submitter_id\tempty_follow-up");
    assert_eq!(qc[1], "101\t101_obs_84\tY");
}

#[test]
fn linked_node_requires_case_node_first() {
    let fixture = Fixture::new(SubjectsType::Clinical);

    let audit = NodeInputs::Audit {
        audit_file: fixture.dcc.join("audit.csv"),
    };
    let error = run_node(&fixture.ctx, &audit).unwrap_err();

    assert!(format!("{error:#}").contains("case_rct_DCC_data_release_v2.0.0.tsv"));
    assert!(!fixture.ctx.qc_path(NodeKind::Audit).exists());
}

#[test]
fn missing_dcc_file_names_the_path() {
    let fixture = Fixture::new(SubjectsType::Observational);
    let inputs = NodeInputs::Case {
        subjects_file: fixture.dcc.join("absent.csv"),
    };

    let error = run_node(&fixture.ctx, &inputs).unwrap_err();

    assert!(format!("{error:#}").contains("absent.csv"));
    assert!(!fixture.ctx.case_node_path().exists());
}
