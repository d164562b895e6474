//! CGB scanline rendering: VRAM bank 1 tile data, per-tile attributes from `cgb_vram`, and
//! palette-RAM colour resolution. Mirrors the DMG draw functions in `mod.rs` but threads
//! attribute bytes through instead of a single global palette.

use crate::hardware::ppu::cgb_vram::CgbTileAttribute;
use crate::hardware::ppu::register_flags::{AttributeFlags, LcdControl};
use crate::hardware::ppu::tiledata::{Tile, TILE_BLOCK_0_START};
use crate::hardware::ppu::{is_sprite_on_scanline, pixel_value, PPU, RESOLUTION_WIDTH};
use num_integer::Integer;

impl PPU {
    pub(super) fn draw_cgb_scanline(&mut self) {
        if self.lcd_control.contains(LcdControl::BG_WINDOW_PRIORITY) {
            self.draw_cgb_bg_scanline();

            if self.lcd_control.contains(LcdControl::WINDOW_DISPLAY) {
                self.draw_cgb_window_scanline();
            }
        } else {
            for x in 0..RESOLUTION_WIDTH {
                self.cgb_scanline_color[x] = 0;
                self.cgb_scanline_palette[x] = 0;
                self.cgb_scanline_priority[x] = false;
                self.cgb_scanline_is_obj[x] = false;
            }
        }

        if self.lcd_control.contains(LcdControl::SPRITE_DISPLAY_ENABLE) {
            self.draw_cgb_sprite_scanline();
        }

        let base = self.current_y as usize * RESOLUTION_WIDTH;
        for x in 0..RESOLUTION_WIDTH {
            let colour = self.cgb_scanline_color[x];
            let palette = self.cgb_scanline_palette[x];
            let is_obj = self.cgb_scanline_is_obj[x];

            self.index_buffer[base + x] = palette * 4 + colour;
            self.rgb_buffer[base + x] = self.cgb_color(is_obj, palette, colour);
        }

        self.current_y = self.current_y.wrapping_add(1);
    }

    fn draw_cgb_bg_scanline(&mut self) {
        let scanline_to_be_rendered = self.current_y.wrapping_add(self.scroll_y);
        let tile_lower_bound = ((scanline_to_be_rendered / 8) as u16 * 32) + (self.scroll_x / 8) as u16;
        let mut tile_higher_bound = tile_lower_bound + 20;

        let tile_line_y = scanline_to_be_rendered % 8;
        let mut pixel_counter: usize = 0;
        let mut x_remainder = (self.scroll_x % 8) as i8;

        if x_remainder != 0 {
            tile_higher_bound += 1;
        }

        for mut i in tile_lower_bound..tile_higher_bound {
            if (self.scroll_x as u16 + pixel_counter as u16) > 255 {
                i -= 32;
            }
            let wrapped = i % super::tiledata::BACKGROUND_TILE_SIZE;
            let attributes = self.get_tile_attributes_cgb_bg(wrapped);
            let tile_line_y = if attributes.contains(CgbTileAttribute::Y_FLIP) { 7 - tile_line_y } else { tile_line_y };

            let tile = self.get_cgb_bg_window_tile(wrapped, attributes);
            let (top_pixel_data, bottom_pixel_data) = tile.get_pixel_line(tile_line_y);

            self.draw_cgb_background_window_line(&mut pixel_counter, &mut x_remainder, top_pixel_data, bottom_pixel_data, attributes);
        }
    }

    fn draw_cgb_window_scanline(&mut self) {
        let window_x = self.window_x.wrapping_sub(7);
        if self.current_y < self.window_y || window_x >= 160 {
            return;
        }

        let tile_lower_bound = (self.window_counter / 8) as u16 * 32;
        let tile_higher_bound = (tile_lower_bound as u16 + (160 - window_x as u16).div_ceil(&8)) as u16;

        let tile_line_y = self.current_y % 8;
        let mut pixel_counter = window_x as usize;
        let mut x_remainder = (window_x % 8) as i8;
        self.window_counter += 1;

        for i in tile_lower_bound..tile_higher_bound {
            let attributes = self.get_tile_attributes_cgb_window(i);
            let tile_line_y = if attributes.contains(CgbTileAttribute::Y_FLIP) { 7 - tile_line_y } else { tile_line_y };

            let tile = self.get_cgb_bg_window_tile(i, attributes);
            let (top_pixel_data, bottom_pixel_data) = tile.get_pixel_line(tile_line_y);

            self.draw_cgb_background_window_line(&mut pixel_counter, &mut x_remainder, top_pixel_data, bottom_pixel_data, attributes);
        }
    }

    /// Resolves a background/window tilemap entry (given its tilemap-relative address) to the
    /// `Tile` it names, honouring the attribute byte's VRAM bank bit.
    fn get_cgb_bg_window_tile(&self, tilemap_address: u16, attributes: CgbTileAttribute) -> Tile {
        let mut tile_relative_address = self.get_tile_address_bg(tilemap_address) as usize;

        if !self.lcd_control.contains(LcdControl::BG_WINDOW_TILE_SELECT) {
            tile_relative_address = (tile_relative_address as i8) as usize;
        }

        let offset: usize = if self.lcd_control.bg_window_tile_address() == TILE_BLOCK_0_START { 0 } else { 256 };
        let tile_address: usize = offset.wrapping_add(tile_relative_address);

        if attributes.contains(CgbTileAttribute::TILE_VRAM_BANK_NUMBER) {
            self.tiles_bank1[tile_address]
        } else {
            self.tiles[tile_address]
        }
    }

    #[inline(always)]
    fn draw_cgb_background_window_line(
        &mut self,
        pixel_counter: &mut usize,
        x_remainder: &mut i8,
        top_pixel_data: u8,
        bottom_pixel_data: u8,
        attributes: CgbTileAttribute,
    ) {
        let x_flip = attributes.contains(CgbTileAttribute::X_FLIP);
        let palette = attributes.bg_palette_numb();
        let priority = attributes.contains(CgbTileAttribute::BG_TO_OAM_PRIORITY);

        let order: Box<dyn Iterator<Item = u8>> = if x_flip { Box::new(0..=7) } else { Box::new((0..=7).rev()) };

        for j in order {
            if *x_remainder > 0 || *pixel_counter > 159 {
                *x_remainder -= 1;
                continue;
            }

            let colour = pixel_value(j, top_pixel_data, bottom_pixel_data);

            self.cgb_scanline_color[*pixel_counter] = colour;
            self.cgb_scanline_palette[*pixel_counter] = palette;
            self.cgb_scanline_priority[*pixel_counter] = priority;
            self.cgb_scanline_is_obj[*pixel_counter] = false;

            *pixel_counter += 1;
        }
    }

    fn draw_cgb_sprite_scanline(&mut self) {
        let tall_sprites = self.lcd_control.contains(LcdControl::SPRITE_SIZE);
        let y_size: u8 = if tall_sprites { 16 } else { 8 };
        // CGB sprite-to-sprite priority is purely OAM index order (no x-position tie-break).
        let always_display_sprite = !self.lcd_control.contains(LcdControl::BG_WINDOW_PRIORITY);

        let sprites_to_draw: Vec<_> = self
            .oam
            .iter()
            .filter(|sprite| {
                let screen_y_pos = sprite.y_pos as i16 - 16;
                is_sprite_on_scanline(self.current_y as i16, screen_y_pos, y_size as i16)
            })
            .take(10)
            .collect();

        for sprite in sprites_to_draw.into_iter().rev() {
            let screen_x_pos = sprite.x_pos as i16 - 8;
            let screen_y_pos = sprite.y_pos as i16 - 16;

            let x_flip = sprite.attribute_flags.contains(AttributeFlags::X_FLIP);
            let y_flip = sprite.attribute_flags.contains(AttributeFlags::Y_FLIP);
            let is_background_sprite = sprite.attribute_flags.contains(AttributeFlags::OBJ_TO_BG_PRIORITY);
            let palette_number = sprite.attribute_flags.get_cgb_palette_number() as u8;
            let bank1 = sprite.attribute_flags.contains(AttributeFlags::TILE_VRAM_BANK);

            let mut line = (self.current_y as i16 - screen_y_pos) as u8;
            if y_flip {
                line = y_size - (line + 1);
            }

            let tile_index = sprite.tile_number as usize;
            let tile = if !tall_sprites {
                if bank1 { self.tiles_bank1[tile_index] } else { self.tiles[tile_index] }
            } else if line < 8 {
                if bank1 { self.tiles_bank1[tile_index & 0xFE] } else { self.tiles[tile_index & 0xFE] }
            } else {
                if bank1 { self.tiles_bank1[tile_index | 0x01] } else { self.tiles[tile_index | 0x01] }
            };

            let (top_pixel_data, bottom_pixel_data) = tile.get_pixel_line(line % 8);

            for j in 0..=7 {
                let pixel = if x_flip { screen_x_pos + j } else { screen_x_pos + (7 - j) };

                if pixel < 0 || pixel > 159 {
                    continue;
                }
                let pixel = pixel as usize;

                let colour = pixel_value(j as u8, top_pixel_data, bottom_pixel_data);
                if colour == 0 {
                    continue;
                }

                // BG colour 0 is always behind OBJ; otherwise either the OAM priority bit or
                // the BG tile's own priority attribute can hide this sprite behind the BG/window.
                if !always_display_sprite
                    && (is_background_sprite || self.cgb_scanline_priority[pixel])
                    && self.cgb_scanline_color[pixel] != 0
                {
                    continue;
                }

                self.cgb_scanline_color[pixel] = colour;
                self.cgb_scanline_palette[pixel] = palette_number;
                self.cgb_scanline_is_obj[pixel] = true;
            }
        }
    }

    fn get_tile_attributes_cgb_bg(&self, address: u16) -> CgbTileAttribute {
        if !self.lcd_control.contains(LcdControl::BG_TILE_MAP_SELECT) {
            self.cgb_attr_9800.attributes[address as usize]
        } else {
            self.cgb_attr_9c00.attributes[address as usize]
        }
    }

    fn get_tile_attributes_cgb_window(&self, address: u16) -> CgbTileAttribute {
        if !self.lcd_control.contains(LcdControl::WINDOW_MAP_SELECT) {
            self.cgb_attr_9800.attributes[address as usize]
        } else {
            self.cgb_attr_9c00.attributes[address as usize]
        }
    }
}
