/// Tag store implementation using lofty
use crate::error::{MetadataError, Result};
use lofty::{
    id3::v2::{FrameId, Id3v2Tag},
    mpeg::MpegFile,
    AudioFile, FileType, ItemKey, MimeType, ParseOptions, Picture, PictureType, Probe, Tag,
    TagExt, TagType, TaggedFile, TaggedFileExt,
};
use songinfo_core::{ArtworkData, SaveFields, TagField, TagRecord, TagStore};
use std::borrow::Cow;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Maximum artwork size (5MB)
pub const MAX_ARTWORK_SIZE: usize = 5 * 1024 * 1024;

/// Tag store using the lofty library
pub struct LoftyTagStore;

impl LoftyTagStore {
    /// Create a new tag store
    pub fn new() -> Self {
        Self
    }

    fn item_key(field: TagField) -> ItemKey {
        match field {
            TagField::Title => ItemKey::TrackTitle,
            TagField::Artist => ItemKey::TrackArtist,
            TagField::Album => ItemKey::AlbumTitle,
            TagField::Genre => ItemKey::Genre,
            TagField::TrackNumber => ItemKey::TrackNumber,
            TagField::DiscNumber => ItemKey::DiscNumber,
            TagField::AlbumArtist => ItemKey::AlbumArtist,
            TagField::Composer => ItemKey::Composer,
            TagField::Year => ItemKey::RecordingDate,
        }
    }

    /// ID3v2 frame holding each field
    fn frame_id(field: TagField) -> &'static str {
        match field {
            TagField::Title => "TIT2",
            TagField::Artist => "TPE1",
            TagField::Album => "TALB",
            TagField::Genre => "TCON",
            TagField::TrackNumber => "TRCK",
            TagField::DiscNumber => "TPOS",
            TagField::AlbumArtist => "TPE2",
            TagField::Composer => "TCOM",
            TagField::Year => "TDRC",
        }
    }

    fn open(path: &Path) -> Result<TaggedFile> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.display().to_string()));
        }

        Probe::open(path)?
            .read()
            .map_err(|e| MetadataError::ParseError(e.to_string()))
    }

    /// Extract the editable fields from a lofty tag
    fn extract_from_tag(tag: &Tag, record: &mut TagRecord) {
        for field in TagField::ALL {
            let value = match field {
                // Dates are stored under different keys depending on the tag version
                TagField::Year => tag
                    .get_string(&ItemKey::RecordingDate)
                    .or_else(|| tag.get_string(&ItemKey::Year)),
                other => tag.get_string(&Self::item_key(other)),
            };
            if let Some(value) = value {
                record.set(field, value);
            }
        }
    }

    fn read_record(path: &Path) -> Result<TagRecord> {
        let tagged_file = Self::open(path)?;
        let mut record = TagRecord::for_path(path);

        let properties = tagged_file.properties();
        let duration = properties.duration();
        record.duration_secs = (!duration.is_zero()).then(|| duration.as_secs_f64());
        record.bitrate_kbps = properties.audio_bitrate();

        if let Some(tag) = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
        {
            Self::extract_from_tag(tag, &mut record);
        }

        if tagged_file.file_type() == FileType::Mpeg {
            match Self::read_id3v2(path) {
                Ok(Some(id3v2)) => Self::extract_empty_frames(&id3v2, &mut record),
                Ok(None) => {}
                Err(e) => debug!("Could not re-read ID3v2 frames of {:?}: {}", path, e),
            }
        }

        Ok(record)
    }

    fn read_id3v2(path: &Path) -> Result<Option<Id3v2Tag>> {
        let mut file = File::open(path)?;
        let mut mpeg = MpegFile::read_from(&mut file, ParseOptions::new().read_properties(false))?;
        Ok(mpeg.remove_id3v2())
    }

    /// Empty text frames for fields the generic tag did not carry.
    ///
    /// lofty drops empty genre and number-pair frames when it builds the
    /// generic tag; they still read back as empty strings here.
    fn extract_empty_frames(id3v2: &Id3v2Tag, record: &mut TagRecord) {
        for field in TagField::ALL {
            if record.get(field).is_some() {
                continue;
            }
            let id = FrameId::Valid(Cow::Borrowed(Self::frame_id(field)));
            if id3v2.get_text(&id) == Some("") {
                record.set(field, "");
            }
        }
    }

    /// Primary tag of the file, created if the file has none yet.
    ///
    /// Returns whether the file also carries an ID3v1 tag, which is stripped
    /// once the new tag is on disk so readers do not fall back to its
    /// truncated values.
    fn primary_tag(tagged_file: &TaggedFile) -> (Tag, bool) {
        let has_id3v1 = tagged_file.tag(TagType::Id3v1).is_some();
        let tag_type = tagged_file.primary_tag_type();
        let tag = tagged_file
            .tag(tag_type)
            .cloned()
            .unwrap_or_else(|| Tag::new(tag_type));
        (tag, has_id3v1)
    }

    fn strip_id3v1(path: &Path, has_id3v1: bool) -> Result<()> {
        if has_id3v1 {
            TagType::Id3v1
                .remove_from_path(path)
                .map_err(|e| MetadataError::WriteError(e.to_string()))?;
            debug!("Removed ID3v1 tag from {:?}", path);
        }
        Ok(())
    }

    fn write_fields(path: &Path, fields: &SaveFields) -> Result<()> {
        let tagged_file = Self::open(path)?;
        let (mut tag, has_id3v1) = Self::primary_tag(&tagged_file);

        for (field, value) in fields.entries() {
            // "No value" is written as empty text, never as a missing frame
            tag.insert_text(Self::item_key(field), value.to_string());
        }
        // An empty total would turn the number pair into "N/", which lofty
        // no longer reads as a track number
        tag.retain(|item| {
            let total_of = match item.key() {
                ItemKey::TrackTotal => &fields.tracknumber,
                ItemKey::DiscTotal => &fields.discnumber,
                _ => return true,
            };
            !total_of.is_empty() && !item.value().is_empty()
        });

        tag.save_to_path(path)
            .map_err(|e: lofty::error::LoftyError| MetadataError::WriteError(e.to_string()))?;
        Self::strip_id3v1(path, has_id3v1)?;

        debug!("Wrote tags to {:?}", path);
        Ok(())
    }

    fn embed(path: &Path, artwork: &ArtworkData) -> Result<()> {
        let tagged_file = Self::open(path)?;
        let (mut tag, has_id3v1) = Self::primary_tag(&tagged_file);

        let picture = Picture::new_unchecked(
            PictureType::CoverFront,
            Some(MimeType::from_str(&artwork.mime_type)),
            Some("Cover".to_string()),
            artwork.data.clone(),
        );
        tag.remove_picture_type(PictureType::CoverFront);
        tag.push_picture(picture);

        tag.save_to_path(path)
            .map_err(|e: lofty::error::LoftyError| MetadataError::EmbedError(e.to_string()))?;
        Self::strip_id3v1(path, has_id3v1)?;

        debug!("Embedded {} byte cover in {:?}", artwork.data.len(), path);
        Ok(())
    }

    fn extract_artwork(path: &Path) -> Result<Option<ArtworkData>> {
        let tagged_file = Self::open(path)?;

        let Some(tag) = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
        else {
            return Ok(None);
        };

        // Prefer front cover, otherwise use first picture
        let pictures = tag.pictures();
        let Some(picture) = pictures
            .iter()
            .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
            .or_else(|| pictures.first())
        else {
            return Ok(None);
        };

        let data = picture.data();
        if data.len() > MAX_ARTWORK_SIZE {
            return Err(MetadataError::ArtworkTooLarge(data.len(), MAX_ARTWORK_SIZE));
        }

        let mime_type = picture
            .mime_type()
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "image/jpeg".to_string());

        Ok(Some(ArtworkData::new(data.to_vec(), mime_type)))
    }
}

impl Default for LoftyTagStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TagStore for LoftyTagStore {
    fn read_tags(&self, path: &Path) -> songinfo_core::Result<TagRecord> {
        Ok(Self::read_record(path)?)
    }

    fn write_tags(&self, path: &Path, fields: &SaveFields) -> songinfo_core::Result<()> {
        Self::write_fields(path, fields).map_err(|e| match e {
            MetadataError::FileNotFound(_) => e.into(),
            other => songinfo_core::SongInfoError::save_failed(other.to_string()),
        })
    }

    fn embed_artwork(&self, path: &Path, artwork: &ArtworkData) -> songinfo_core::Result<()> {
        Self::embed(path, artwork)
            .map_err(|e| songinfo_core::SongInfoError::embed_failed(e.to_string()))
    }

    fn read_artwork(&self, path: &Path) -> songinfo_core::Result<Option<ArtworkData>> {
        Ok(Self::extract_artwork(path)?)
    }
}
