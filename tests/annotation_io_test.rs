//! Tests for reading, projecting and writing annotation tables.

use std::fs;
use std::io::Write;

use tempfile::{NamedTempFile, TempDir};
use urbansas_filter::Error;
use urbansas_filter::annotations::{
    read_audio_annotations, read_video_annotations, relabel, segment_id,
};
use urbansas_filter::output::{CsvWriter, write_all};
use urbansas_filter::segment::{Segment, project};

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".csv").unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_filtered_tables_keep_source_schema() {
    let video = csv_file(
        "filename,frame_id,class,time,x\n\
         street,2,car,1.0,0.1\n\
         street,4,car,2.0,0.5\n\
         street,4,bus,2.0,0.7\n\
         street,7,car,3.5,0.9\n",
    );
    let audio = csv_file(
        "filename,start,end,label\n\
         street,1.0,2.0,car\n\
         street,3.5,4.0,bus\n",
    );

    let video_table = read_video_annotations(video.path()).unwrap();
    let audio_table = read_audio_annotations(audio.path()).unwrap();

    let segment = Segment::new(3, 6);
    let mut projection = project(segment, "street", &video_table.rows, &audio_table.rows);
    let id = segment_id("street", 0);
    relabel(&mut projection.video, &id);
    relabel(&mut projection.audio, &id);

    let dir = TempDir::new().unwrap();
    let video_out = dir.path().join("video_annotations.csv");
    let audio_out = dir.path().join("audio_annotations.csv");

    let mut writer = CsvWriter::new(&video_out, video_table.headers.clone()).unwrap();
    write_all(&mut writer, &projection.video).unwrap();
    let mut writer = CsvWriter::new(&audio_out, audio_table.headers.clone()).unwrap();
    write_all(&mut writer, &projection.audio).unwrap();

    assert_eq!(
        fs::read_to_string(&video_out).unwrap(),
        "filename,frame_id,class,time,x\n\
         street_0,1,car,0.5,0.5\n\
         street_0,1,bus,0.5,0.7\n"
    );
    assert_eq!(
        fs::read_to_string(&audio_out).unwrap(),
        "filename,start,end,label\n\
         street_0,1.5,2.0,car\n"
    );
}

#[test]
fn test_missing_time_column_is_appended() {
    let video = csv_file("filename,frame_id,class\nstreet,6,car\n");
    let table = read_video_annotations(video.path()).unwrap();

    assert_eq!(table.headers, vec!["filename", "frame_id", "class", "time"]);
    assert_eq!(table.rows[0].time, 3.0);
}

#[test]
fn test_bom_and_padded_keys_are_tolerated() {
    let audio = csv_file("\u{FEFF}filename, start, end, label\nstreet, 0.5, 1.0, car\n");
    let table = read_audio_annotations(audio.path()).unwrap();

    assert_eq!(table.headers[0], "filename");
    assert_eq!(table.rows[0].filename, "street");
    assert_eq!(table.rows[0].start, 0.5);
    assert_eq!(table.rows[0].attributes, vec![" car".to_string()]);
}

#[test]
fn test_missing_key_column_is_reported() {
    let audio = csv_file("filename,onset,end\nstreet,0.5,1.0\n");
    let result = read_audio_annotations(audio.path());
    assert!(matches!(
        result,
        Err(Error::MissingColumn { column: "start", .. })
    ));
}

#[test]
fn test_reversed_interval_is_rejected_with_line() {
    let audio = csv_file("filename,start,end\nstreet,0.5,1.0\nstreet,3.0,2.0\n");
    let err = read_audio_annotations(audio.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidAnnotationFormat { .. }));
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn test_fractional_frame_id_is_rejected() {
    let video = csv_file("filename,frame_id\nstreet,1.5\n");
    assert!(matches!(
        read_video_annotations(video.path()),
        Err(Error::InvalidAnnotationFormat { .. })
    ));
}
