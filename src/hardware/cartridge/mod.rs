use crate::error::CoreError;
use crate::hardware::cartridge::header::CartridgeHeader;
use crate::hardware::cartridge::mapper::Mapper;

pub mod header;
pub mod mapper;

#[derive(Debug)]
pub struct Cartridge {
    header: CartridgeHeader,
    rom: Vec<u8>,
    ram: Vec<u8>,
    mapper: Mapper,
    has_battery: bool,
}

impl Cartridge {
    pub fn new(rom: Vec<u8>, saved_ram: Option<Vec<u8>>) -> Result<Self, CoreError> {
        if rom.len() < 0x150 {
            return Err(CoreError::BadHeader(format!(
                "ROM is only {} bytes, too short to contain a header",
                rom.len()
            )));
        }

        let header = CartridgeHeader::new(&rom);
        let mapper = Mapper::new(&header);
        let has_battery = Mapper::has_battery(&header);
        let ram_size = header.ram_size_bytes();

        let ram = match saved_ram {
            Some(ram) if ram.len() == ram_size => ram,
            _ => vec![0xFFu8; ram_size],
        };

        Ok(Cartridge { header, rom, ram, mapper, has_battery })
    }

    pub fn title(&self) -> &str {
        &self.header.title
    }

    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub fn read_0000_3fff(&self, address: u16) -> u8 {
        self.mapper.read_rom(&self.rom, address)
    }

    pub fn read_4000_7fff(&self, address: u16) -> u8 {
        self.mapper.read_rom(&self.rom, address)
    }

    pub fn read_external_ram(&self, address: u16) -> u8 {
        self.mapper.read_ram(&self.ram, address)
    }

    pub fn write_byte(&mut self, address: u16, value: u8) {
        match address {
            0x0000..=0x7FFF => self.mapper.write_rom(address, value),
            0xA000..=0xBFFF => self.mapper.write_ram(&mut self.ram, address, value),
            _ => {}
        }
    }

    /// Returns the external RAM contents if this cartridge has a battery, for save persistence.
    pub fn battery_ram(&self) -> Option<&[u8]> {
        if self.has_battery && !self.ram.is_empty() {
            Some(&self.ram)
        } else {
            None
        }
    }
}
